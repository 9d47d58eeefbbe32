//! pdftoolbox binary entry point.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use pdftoolbox::cli::{Cli, Command};
use pdftoolbox::utils::{collect_paths_for_patterns, format_file_size};
use pdftoolbox::{archive, compress, document, io, merge, split};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    match cli.command {
        Command::Compress {
            input,
            output,
            quality,
            json,
        } => {
            let file = io::read_file(&input)
                .await
                .with_context(|| format!("failed to read {}", input.display()))?;

            let (bytes, stats) = compress::compress(&file.bytes, quality)?;
            io::write_file(&output, &bytes).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else if !quiet {
                println!(
                    "Compressed {} -> {} ({:.1}% reduction)",
                    format_file_size(stats.original_size as u64),
                    format_file_size(stats.compressed_size as u64),
                    stats.reduction_pct
                );
                println!("Written to: {}", output.display());
            }
        }

        Command::Split {
            input,
            mode,
            pages,
            output_dir,
            archive: archive_path,
        } => {
            let file = io::read_file(&input)
                .await
                .with_context(|| format!("failed to read {}", input.display()))?;

            let outputs = split::split(&file.bytes, mode, &pages)?;
            if outputs.is_empty() && !quiet {
                println!("No pages selected; nothing written.");
            }

            for page in &outputs {
                let path = output_dir.join(&page.filename);
                io::write_file(&path, &page.bytes).await?;
                if !quiet {
                    println!("Written: {}", path.display());
                }
            }

            if let Some(archive_path) = archive_path {
                let packed = archive::pack_archive(&outputs)?;
                io::write_file(&archive_path, &packed).await?;
                if !quiet {
                    println!(
                        "Archive: {} ({} files, {})",
                        archive_path.display(),
                        outputs.len(),
                        format_file_size(packed.len() as u64)
                    );
                }
            }
        }

        Command::Merge { inputs, output } => {
            let paths = resolve_inputs(&inputs)?;
            if paths.len() < 2 {
                bail!(
                    "merge needs at least two input files, found {}",
                    paths.len()
                );
            }

            let files = io::read_all(&paths, io::DEFAULT_CONCURRENCY).await?;
            if !quiet {
                println!("Merging {} PDF files...", files.len());
            }

            let buffers: Vec<Vec<u8>> = files.into_iter().map(|f| f.bytes).collect();
            let merged = merge::merge(&buffers)?;
            io::write_file(&output, &merged).await?;

            if !quiet {
                println!(
                    "Written: {} ({})",
                    output.display(),
                    format_file_size(merged.len() as u64)
                );
            }
        }

        Command::Info { input, json } => {
            let file = io::read_file(&input)
                .await
                .with_context(|| format!("failed to read {}", input.display()))?;

            let summary = document::summarize(&file.bytes)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("File:     {}", input.display());
                println!("Size:     {}", format_file_size(file.size() as u64));
                println!("Version:  {}", summary.version);
                println!("Pages:    {}", summary.page_count);
                println!("Objects:  {}", summary.object_count);
                if let Some((width, height)) = summary.page_dimensions {
                    println!("Page box: {width:.1} x {height:.1} pt");
                }
            }
        }
    }

    Ok(())
}

/// Expand merge inputs, treating each argument as a glob pattern. An
/// argument that matches nothing is kept literally so the missing file is
/// reported by the read, not silently dropped.
fn resolve_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        let expanded = collect_paths_for_patterns([input.as_str()])?;
        if expanded.is_empty() {
            paths.push(PathBuf::from(input));
        } else {
            paths.extend(expanded);
        }
    }
    Ok(paths)
}
