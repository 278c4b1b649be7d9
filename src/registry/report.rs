use std::io::{self, Write};

use tracing::warn;

use super::catalogue::{RouteCatalogue, RouteEntry};

/// Minimum spacing between report columns.
const COLUMN_GAP: usize = 2;

impl RouteCatalogue {
    /// Write the routing report to `w` as a column-aligned tree.
    ///
    /// Groups with no children are omitted. Each group prints a heading line
    /// followed by one line per child (path, method, handler identity);
    /// top-level leaves print as single lines.
    pub fn render<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let mut rows: Vec<[String; 3]> = Vec::new();

        for entry in self.entries() {
            match entry {
                RouteEntry::Group {
                    base_path,
                    children,
                } => {
                    if children.is_empty() {
                        continue;
                    }
                    rows.push([format!("[router]├── {base_path}"), String::new(), String::new()]);
                    for child in children {
                        rows.push([
                            format!("[router]│   └── {}", child.path),
                            child.method.to_string(),
                            child.handler_name.clone(),
                        ]);
                    }
                }
                RouteEntry::Route(info) => {
                    rows.push([
                        format!("[router]├── {}", info.path),
                        info.method.to_string(),
                        info.handler_name.clone(),
                    ]);
                }
            }
        }

        // Cell widths count chars, not bytes; the tree prefixes are multi-byte.
        let width = |column: usize| {
            rows.iter()
                .map(|row| row[column].chars().count())
                .max()
                .unwrap_or(0)
        };
        let path_width = width(0);
        let method_width = width(1);

        for [path, method, handler] in &rows {
            let line = format!(
                "{path:<pw$}{method:<mw$}{handler}",
                pw = path_width + COLUMN_GAP,
                mw = method_width + COLUMN_GAP,
            );
            writeln!(w, "{}", line.trim_end())?;
        }

        w.flush()
    }

    /// Render the report to standard output.
    pub fn print(&self) {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        if let Err(err) = self.render(&mut lock) {
            warn!("failed to write routing report: {err}");
        }
    }
}
