//! `tbforge gen`: artifact generation pipeline.
//!
//! 1. Extract the module's port table from the source file
//! 2. Generate the artifacts
//! 3. Write the driver and harness into the output directory

use std::fs;
use std::path::Path;

use tbforge_core::{extract_from_path, generate, ArtifactKind};

use crate::{GenArgs, GlobalArgs};

/// Runs the `tbforge gen` command.
///
/// Writes `<module>_interface.rs` and `<module>_harness.rs` into the output
/// directory, creating it if needed. Returns exit code 0 on success.
pub fn run(args: &GenArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    // Step 1: Extract the port table
    let table = extract_from_path(Path::new(&args.file), &args.module)?;

    if !global.quiet {
        eprintln!(
            "   Extracted {} port(s) from module '{}'",
            table.len(),
            table.module()
        );
    }
    if global.verbose && !global.quiet {
        for port in table.iter() {
            eprintln!("     {:<13} {} ({}-bit)", port.direction, port.name, port.width);
        }
    }

    // Step 2: Generate artifacts
    let artifacts = generate(&table);

    // Step 3: Write the code artifacts; the summary is `inspect` output
    let out_dir = Path::new(&args.out_dir);
    fs::create_dir_all(out_dir)?;
    for artifact in &artifacts {
        if artifact.kind == ArtifactKind::Summary {
            continue;
        }
        let path = out_dir.join(&artifact.file_name);
        fs::write(&path, &artifact.content)?;
        if !global.quiet {
            eprintln!("     Created {}", path.display());
        }
    }

    Ok(0)
}
