use crate::index::build::TextIndex;
use crate::index::types::IndexMeta;
use anyhow::Result;
use std::io::{self, Write};

/// Display index statistics
pub fn show_stats(index: &TextIndex, json: bool) -> Result<()> {
    let meta = &index.meta;

    if json {
        println!("{}", serde_json::to_string_pretty(meta)?);
        return Ok(());
    }

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Source:           {}", meta.source);
    println!("Text size:        {}", format_size(meta.text_size));
    println!("Lines:            {}", meta.line_count);
    println!("Case-insensitive: {}", meta.config.case_insensitive);
    println!("Binary allowed:   {}", meta.config.allow_binary);
    println!("Size limit:       {}", format_size(meta.config.max_text_size));
    println!();
    println!("Nodes:            {}", meta.node_count);
    println!("  Leaves:         {}", meta.leaf_count);
    println!("  Internal:       {}", meta.internal_count);
    println!("Max depth:        {}", meta.max_depth);
    println!("Nodes per byte:   {}", format_ratio(meta));
    println!();
    println!("Build time:       {} ms", meta.build_millis);

    Ok(())
}

/// Print every edge of the tree, indented by depth
pub fn show_tree(index: &TextIndex) -> Result<()> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_tree(index, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Write the edge listing of `index` to `out`.
///
/// Leaves show the offset of the suffix they end; `$` marks the terminator.
pub fn write_tree<W: Write>(index: &TextIndex, out: &mut W) -> io::Result<()> {
    let tree = index.tree();
    writeln!(out, "(root)")?;

    for (depth, id) in tree.edges_in_order() {
        let (label, terminated) = tree.edge_label(id);
        let node = tree.node(id);

        write!(out, "{:indent$}", "", indent = depth * 2)?;
        write!(out, "\"{}", escape_label(label))?;
        if terminated {
            write!(out, "$")?;
        }
        write!(out, "\"")?;

        match node.suffix_start() {
            Some(start) => writeln!(out, " @{}", start)?,
            None => writeln!(out)?,
        }
    }

    Ok(())
}

fn escape_label(label: &[u8]) -> String {
    label.escape_ascii().to_string()
}

fn format_ratio(meta: &IndexMeta) -> String {
    if meta.text_size == 0 {
        return "-".to_string();
    }
    format!("{:.2}", meta.node_count as f64 / meta.text_size as f64)
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
