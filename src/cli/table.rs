use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

/// Render `builder` with right-aligned numeric columns.
pub(crate) fn render(builder: Builder, numeric: std::ops::Range<usize>) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(numeric), Alignment::right());

    table.to_string()
}
