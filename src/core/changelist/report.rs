use super::FileChanges;

const TABLE_HEADER: &str = "| Original Name                 | New Name                 |\n";
const TABLE_SEPARATOR: &str = "|-------------------------------|--------------------------|\n";

/// One `### <file stem>` section with a two-column table per processed file.
/// Files without changes still get their heading and table header.
pub fn render_markdown(sections: &[FileChanges]) -> String {
    let mut out = String::new();

    for section in sections {
        out.push_str(&format!("### {}\n", section.name));
        out.push_str(TABLE_HEADER);
        out.push_str(TABLE_SEPARATOR);
        for change in &section.changes {
            out.push_str(&format!("| {} | {} |\n", change.original, change.new));
        }
        out.push('\n');
    }

    out
}
