//! wavecrate CLI - inspect and normalize Wavefront OBJ / MTL files
//!
//! Set `RUST_LOG=debug` to see skipped statements while reading.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use wavecrate_core::{ElementKind, MtlDocument, ObjDocument};
use wavecrate_io::{
    read_document, write_document, Document, DocumentWriter, MtlReadOptions, MtlWriter,
    ObjReadOptions, ObjWriter, ReadOptions,
};

#[derive(Parser)]
#[command(name = "wavecrate")]
#[command(about = "Inspect and normalize Wavefront OBJ and MTL files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary of a .obj or .mtl file
    Info {
        /// Input file (format determined by extension: .obj, .mtl)
        file: PathBuf,
        #[command(flatten)]
        read: ReadFlags,
    },
    /// Read a file and write it back in canonical form
    Format {
        /// Input file (.obj or .mtl)
        input: PathBuf,
        /// Output file with the same extension, stdout if omitted
        output: Option<PathBuf>,
        #[command(flatten)]
        read: ReadFlags,
    },
}

/// Reader settings exposed on the command line
#[derive(Args, Debug, Clone, Default)]
struct ReadFlags {
    /// Treat `o` statements as group declarations
    #[arg(long)]
    objects_as_groups: bool,
    /// Create a new group for every `g` statement
    #[arg(long)]
    new_group_per_statement: bool,
    /// Join all names on a `g` line into one group name
    #[arg(long)]
    single_group_name: bool,
    /// Keep whitespace inside `mtllib` and texture map file names
    #[arg(long)]
    keep_whitespace: bool,
}

impl From<&ReadFlags> for ReadOptions {
    fn from(flags: &ReadFlags) -> Self {
        ReadOptions {
            obj: ObjReadOptions::new()
                .with_object_names_as_group(flags.objects_as_groups)
                .with_new_group_per_statement(flags.new_group_per_statement)
                .with_single_group_name_per_line(flags.single_group_name)
                .with_whitespace_in_library_names(flags.keep_whitespace),
            mtl: MtlReadOptions::new().with_whitespace_in_map_file_names(flags.keep_whitespace),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file, read } => show_info(&file, &ReadOptions::from(&read))?,
        Commands::Format { input, output, read } => {
            format_file(&input, output.as_deref(), &ReadOptions::from(&read))?
        }
    }

    Ok(())
}

fn load(path: &Path, options: &ReadOptions) -> Result<Document> {
    read_document(path, options).with_context(|| format!("failed to read {}", path.display()))
}

fn show_info(path: &Path, options: &ReadOptions) -> Result<()> {
    let document = load(path, options)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "File: {}", path.display())?;
    match &document {
        Document::Obj(obj) => write_obj_summary(&mut out, obj)?,
        Document::Mtl(mtl) => write_mtl_summary(&mut out, mtl)?,
    }
    Ok(())
}

fn write_obj_summary<W: Write>(out: &mut W, doc: &ObjDocument) -> Result<()> {
    writeln!(out, "Vertices: {}", doc.vertices.len())?;
    writeln!(out, "Texture vertices: {}", doc.texture_vertices.len())?;
    writeln!(out, "Vertex normals: {}", doc.vertex_normals.len())?;
    writeln!(out, "Parameter space vertices: {}", doc.parameter_space_vertices.len())?;

    for (kind, label) in [
        (ElementKind::Point, "Points"),
        (ElementKind::Line, "Lines"),
        (ElementKind::Face, "Faces"),
        (ElementKind::Curve, "Curves"),
        (ElementKind::Curve2D, "2D curves"),
        (ElementKind::Surface, "Surfaces"),
    ] {
        let count = doc.element_count(kind);
        if count > 0 {
            writeln!(out, "{}: {}", label, count)?;
        }
    }
    if !doc.surface_connections.is_empty() {
        writeln!(out, "Surface connections: {}", doc.surface_connections.len())?;
    }

    if !doc.groups.is_empty() {
        writeln!(out, "Groups:")?;
        for group in &doc.groups {
            let members: usize = ElementKind::ALL
                .iter()
                .map(|kind| group.members(*kind).len())
                .sum();
            let name = group.name.as_deref().unwrap_or("default");
            writeln!(out, "  {} ({} elements)", name, members)?;
        }
    }
    if !doc.material_libraries.is_empty() {
        writeln!(out, "Material libraries: {}", doc.material_libraries.join(", "))?;
    }

    let has_colors = doc.vertices.iter().any(|v| v.color.is_some());
    writeln!(out, "Vertex colors: {}", if has_colors { "yes" } else { "no" })?;
    Ok(())
}

fn write_mtl_summary<W: Write>(out: &mut W, doc: &MtlDocument) -> Result<()> {
    writeln!(out, "Materials: {}", doc.len())?;
    for material in &doc.materials {
        let diffuse = match material.diffuse_color.as_ref().and_then(|c| c.color()) {
            Some(c) => format!("Kd {:.3} {:.3} {:.3}", c.x, c.y, c.z),
            None => "no diffuse color".to_string(),
        };
        writeln!(out, "  {} ({})", material.name, diffuse)?;
    }
    Ok(())
}

fn format_file(input: &Path, output: Option<&Path>, options: &ReadOptions) -> Result<()> {
    let document = load(input, options)?;

    match output {
        Some(path) => {
            write_document(&document, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let out = stdout.lock();
            match &document {
                Document::Obj(obj) => ObjWriter::write_to(obj, out)?,
                Document::Mtl(mtl) => MtlWriter::write_to(mtl, out)?,
            }
        }
    }

    Ok(())
}
