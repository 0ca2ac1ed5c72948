use std::io::{self, IsTerminal, Write};

use linkboard_shared::{CategoryId, LinkId};
use unicode_width::UnicodeWidthStr;

use crate::config::ClientConfig;
use crate::store::Snapshot;

pub const EMPTY_COLUMN_PLACEHOLDER: &str = "No links yet.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

/// One board column per category; `category_id` addresses the
/// delete-category affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub category_id: CategoryId,
    pub title: String,
    pub body: ColumnBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnBody {
    Placeholder(String),
    Links(Vec<LinkRow>),
}

/// `link_id` addresses both the edit and the delete affordance of the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRow {
    pub link_id: LinkId,
    pub label: String,
    pub href: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
}

impl ColumnView {
    pub fn rows(&self) -> &[LinkRow] {
        match &self.body {
            ColumnBody::Links(rows) => rows,
            ColumnBody::Placeholder(_) => &[],
        }
    }
}

/// Groups the snapshot's links under their category, in category order.
///
/// Links are matched with a stable filter over `snapshot.links`, so rows keep
/// the service's order. A link whose category is absent from the snapshot is
/// not rendered.
pub fn render(snapshot: &Snapshot) -> BoardView {
    let columns = snapshot
        .categories
        .iter()
        .map(|category| {
            let rows: Vec<LinkRow> = snapshot
                .links
                .iter()
                .filter(|link| link.category_id == category.id)
                .map(|link| LinkRow {
                    link_id: link.id,
                    label: link.name.clone(),
                    href: link.url.clone(),
                    title: link.url.clone(),
                })
                .collect();

            let body = if rows.is_empty() {
                ColumnBody::Placeholder(EMPTY_COLUMN_PLACEHOLDER.to_string())
            } else {
                ColumnBody::Links(rows)
            };

            ColumnView {
                category_id: category.id,
                title: category.name.clone(),
                body,
            }
        })
        .collect();

    BoardView { columns }
}

/// Options for the link form's category selector, in snapshot order.
pub fn category_options(snapshot: &Snapshot) -> Vec<CategoryOption> {
    snapshot
        .categories
        .iter()
        .map(|category| CategoryOption {
            value: category.id.to_string(),
            label: category.name.clone(),
        })
        .collect()
}

/// Prints a [`BoardView`] as one small table per column.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    color: bool,
}

impl TextRenderer {
    pub fn new(cfg: &ClientConfig) -> Self {
        Self { color: cfg.color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Colour is only kept when stdout is a terminal.
    #[tracing::instrument(skip_all, fields(columns = board.columns.len()))]
    pub fn print_board(&self, board: &BoardView) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let renderer = Self {
            color: self.color && stdout.is_terminal(),
        };
        renderer.write_board(stdout.lock(), board)
    }

    pub fn write_board<W: Write>(&self, mut writer: W, board: &BoardView) -> anyhow::Result<()> {
        if board.columns.is_empty() {
            writeln!(writer, "No categories.")?;
            return Ok(());
        }

        for (idx, column) in board.columns.iter().enumerate() {
            if idx > 0 {
                writeln!(writer)?;
            }
            self.write_column(&mut writer, column)?;
        }
        Ok(())
    }

    fn write_column<W: Write>(&self, writer: &mut W, column: &ColumnView) -> anyhow::Result<()> {
        let heading = format!("{} (#{})", column.title, column.category_id);
        writeln!(writer, "{}", self.paint(&heading, BOLD))?;

        let rows = match &column.body {
            ColumnBody::Placeholder(text) => {
                writeln!(writer, "{INDENT}{text}")?;
                return Ok(());
            }
            ColumnBody::Links(rows) => rows,
        };

        let ids: Vec<String> = rows.iter().map(|row| row.link_id.to_string()).collect();
        let id_width = ids.iter().map(|id| id.width()).fold("ID".width(), usize::max);
        let name_width = rows
            .iter()
            .map(|row| row.label.width())
            .fold("Name".width(), usize::max);

        writeln!(writer, "{INDENT}{} {} URL", pad("ID", id_width), pad("Name", name_width))?;
        writeln!(
            writer,
            "{INDENT}{} {} ---",
            "-".repeat(id_width),
            "-".repeat(name_width)
        )?;

        // Pad before painting so escape codes never count toward a width.
        for (id, row) in ids.iter().zip(rows) {
            writeln!(
                writer,
                "{INDENT}{} {} {}",
                self.paint(&pad(id, id_width), YELLOW),
                pad(&row.label, name_width),
                row.href
            )?;
        }
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

const INDENT: &str = "  ";
const BOLD: &str = "1";
const YELLOW: &str = "33";

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}
