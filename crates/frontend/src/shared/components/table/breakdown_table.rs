use leptos::prelude::*;
use thaw::*;

/// Column of a [`BreakdownTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    /// Right-aligned numeric column
    pub numeric: bool,
}

impl Column {
    pub const fn text(title: &'static str) -> Self {
        Self {
            title,
            numeric: false,
        }
    }

    pub const fn number(title: &'static str) -> Self {
        Self {
            title,
            numeric: true,
        }
    }
}

/// Read-only table of pre-formatted rows
#[component]
pub fn BreakdownTable(columns: Vec<Column>, rows: Vec<Vec<String>>) -> impl IntoView {
    let header = columns
        .iter()
        .copied()
        .map(|column| {
            let style = if column.numeric { "text-align: right;" } else { "" };
            view! {
                <TableHeaderCell min_width=100.0>
                    <span style=style>{column.title}</span>
                </TableHeaderCell>
            }
        })
        .collect_view();

    let body = rows
        .into_iter()
        .map(|row| {
            let cells = row
                .into_iter()
                .zip(columns.iter().copied())
                .map(|(text, column)| {
                    let class = if column.numeric {
                        "breakdown-table__cell breakdown-table__cell--numeric"
                    } else {
                        "breakdown-table__cell"
                    };
                    view! {
                        <TableCell>
                            <TableCellLayout truncate=true>
                                <span class=class>{text}</span>
                            </TableCellLayout>
                        </TableCell>
                    }
                })
                .collect_view();
            view! { <TableRow>{cells}</TableRow> }
        })
        .collect_view();

    view! {
        <div class="breakdown-table">
            <Table>
                <TableHeader>
                    <TableRow>{header}</TableRow>
                </TableHeader>
                <TableBody>{body}</TableBody>
            </Table>
        </div>
    }
}
