//! XAC CLI commands
//!
//! Commands for inspecting and dumping XAC files.

use std::path::Path;
use std::time::Instant;

use console::style;

use crate::cli::progress::{CUBE, DISK, LOOKING_GLASS, TRUCK, print_done, print_step, simple_bar};
use crate::formats::xac::{
    DecodeOptions, Severity, XacSummary, batch_inspect, decode_xac_bytes_with_progress, find_xac_files,
    inspect_xac_with_options, list_chunks,
};

/// Inspect an XAC file and display its structure.
pub fn inspect(path: &Path, output: Option<&Path>, options: &DecodeOptions) -> anyhow::Result<()> {
    let summary = inspect_xac_with_options(path, options)?;

    if let Some(output) = output {
        std::fs::write(output, summary.to_json()?)?;
        println!("Written to: {}", output.display());
        return Ok(());
    }

    println!("Inspecting XAC file: {}", path.display());
    println!();
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &XacSummary) {
    let header = &summary.header;
    println!("XAC File Information");
    println!("====================");
    println!("Version:     {}.{}", header.major_version, header.minor_version);
    println!("Byte order:  {}", if header.big_endian { "big-endian" } else { "little-endian" });
    println!("File size:   {} bytes", summary.file_size);
    println!("Chunks:      {}", summary.chunk_count);
    println!("Nodes:       {} ({} roots)", summary.node_count, summary.root_count);
    println!("Skins:       {}", summary.skin_count);
    println!();

    println!("Meshes ({}):", summary.meshes.len());
    for mesh in &summary.meshes {
        let name = mesh.node_name.as_deref().unwrap_or("<missing node>");
        let mut flags = String::new();
        if mesh.is_collision {
            flags.push_str(" [collision]");
        }
        if mesh.placeholder {
            flags.push_str(" [placeholder]");
        }
        println!(
            "  - node {} {} ({} vertices, {} triangles, {} submeshes){}",
            mesh.node_id, name, mesh.vertex_count, mesh.face_count, mesh.submesh_count, flags
        );
    }
    println!();

    println!("Materials ({}):", summary.materials.len());
    for material in &summary.materials {
        println!("  - {}", material.name);
        for texture in &material.textures {
            println!("      {texture}");
        }
    }

    if !summary.diagnostics.is_empty() {
        println!();
        println!("Diagnostics ({}):", summary.diagnostics.len());
        for diagnostic in &summary.diagnostics {
            let line = diagnostic.to_string();
            match diagnostic.severity() {
                Severity::Error => println!("  {}", style(line).red()),
                Severity::Warning => println!("  {}", style(line).yellow()),
                Severity::Info => println!("  {}", style(line).dim()),
            }
        }
    }
}

/// Print the chunk table of an XAC file.
pub fn chunks(path: &Path) -> anyhow::Result<()> {
    let data = std::fs::read(path)?;
    let chunks = list_chunks(&data)?;

    println!("{} chunks in {}", chunks.len(), path.display());
    println!();
    println!("  {:>10}  {:<16} {:>8} {:>10}", "Offset", "Type", "Version", "Length");
    for chunk in &chunks {
        let truncated = if chunk.payload_offset() + chunk.length > data.len() {
            " (truncated)"
        } else {
            ""
        };
        println!(
            "  {:>#10x}  {:<16} {:>8} {:>10}{}",
            chunk.offset,
            chunk.chunk_type.to_string(),
            chunk.version,
            chunk.length,
            truncated
        );
    }
    Ok(())
}

/// Write the full decoded scene and its diagnostics as JSON.
pub fn dump(path: &Path, output: &Path, options: &DecodeOptions) -> anyhow::Result<()> {
    let start = Instant::now();

    print_step(1, 2, LOOKING_GLASS, &format!("Decoding {}...", path.display()));
    let data = std::fs::read(path)?;
    let decoded = decode_xac_bytes_with_progress(&data, options, &|progress| {
        tracing::debug!("{} ({:.0}%)", progress.phase.as_str(), progress.percentage() * 100.0);
    })?;

    print_step(2, 2, DISK, &format!("Writing {}...", output.display()));
    std::fs::write(output, serde_json::to_string_pretty(&decoded)?)?;

    let errors = decoded.diagnostics_at(Severity::Error).count();
    if errors > 0 {
        println!("{} {errors} chunks failed to decode", style("!").yellow().bold());
    }
    print_done(start.elapsed());
    Ok(())
}

/// Inspect every XAC file under a directory.
pub fn batch(dir: &Path, output: Option<&Path>, quiet: bool, options: &DecodeOptions) -> anyhow::Result<()> {
    let start = Instant::now();
    let files = find_xac_files(dir);

    if files.is_empty() {
        println!("No XAC files found in: {}", dir.display());
        return Ok(());
    }

    print_step(1, 2, TRUCK, &format!("Found {} XAC files", files.len()));

    let result = if !quiet {
        let pb = simple_bar(files.len() as u64, "Inspecting");
        let result = batch_inspect(&files, options, |progress| {
            pb.set_position(progress.current as u64);
        });
        pb.finish_and_clear();
        result
    } else {
        batch_inspect(&files, options, |_| {})
    };

    print_step(2, 2, CUBE, "Summarizing...");
    println!("  Success: {}", result.success_count);
    println!("  Failed:  {}", result.fail_count);

    let with_errors = result
        .results
        .iter()
        .filter_map(|entry| entry.summary.as_ref())
        .filter(|s| s.diagnostics.iter().any(|d| d.severity() == Severity::Error))
        .count();
    if with_errors > 0 {
        println!("  With chunk errors: {with_errors}");
    }

    if result.fail_count > 0 {
        println!();
        println!("Failures:");
        for entry in result.results.iter().filter(|e| e.error.is_some()) {
            let display = entry.path.strip_prefix(dir).unwrap_or(entry.path.as_path()).display();
            println!("  {display}: {}", entry.error.as_deref().unwrap_or_default());
        }
    }

    if let Some(output) = output {
        std::fs::write(output, serde_json::to_string_pretty(&result)?)?;
        println!();
        println!("Written to: {}", output.display());
    }

    print_done(start.elapsed());
    Ok(())
}
