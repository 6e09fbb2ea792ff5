use std::path::Path;

use anyhow::Result;
use site_vfs::{
    CaseNormalizingFS, CountingBackend, FsBackend, MemoryFS, SearchOption, StatsTrackingFS,
};
use tracing_subscriber::EnvFilter;

/// Copies every page and stylesheet from `src` to `out`, wrapping pages in a layout.
fn build<F: FsBackend>(fs: &mut F, src: &Path, out: &Path) -> Result<usize> {
    let layout = fs.read_all_text(&src.join("layout.tmpl"))?;
    let mut written = 0;

    for page in fs.enumerate_matching(src, "*.md")? {
        let body = fs.read_all_text(&page)?;
        let Some(stem) = page.file_stem() else {
            continue;
        };
        let target = out.join(stem).with_extension("html");
        fs.write_all_text(&target, &layout.replace("{{body}}", &body))?;
        written += 1;
    }

    for sheet in fs.enumerate_files(src, "*.css", SearchOption::AllDirectories)? {
        let Ok(relative) = sheet.strip_prefix(src) else {
            continue;
        };
        let bytes = fs.read_all_bytes(&sheet)?;
        fs.write_all_bytes(&out.join(relative), &bytes)?;
        written += 1;
    }

    Ok(written)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let src = Path::new("/site/src");
    let out = Path::new("/site/out");

    // sources go through the same lower-casing as the build reads
    let mut sources = CaseNormalizingFS::new(MemoryFS::new());
    sources.write_all_text(&src.join("layout.tmpl"), "<html><body>{{body}}</body></html>")?;
    sources.write_all_text(&src.join("Index.md"), "# Welcome")?;
    sources.write_all_text(&src.join("About.md"), "# About us")?;
    sources.write_all_text(&src.join("css").join("site.css"), "body { margin: 0 }")?;
    sources.write_all_text(&src.join("LICENSE"), "MIT")?;

    let mut fs = StatsTrackingFS::new(sources);
    let written = build(&mut fs, src, out)?;
    tracing::info!(written, "site built");

    for file in fs.enumerate_files(out, "*", SearchOption::AllDirectories)? {
        println!("{}", file.display());
    }
    println!();
    print!("{}", fs.report());
    fs.report().log();

    Ok(())
}
