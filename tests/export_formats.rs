//! Exports rendered from the bundled catalog read back as CSV with the
//! expected fields.

use std::path::PathBuf;

use jiff::{Timestamp, tz::TimeZone};
use testresult::TestResult;

use pedidos::prelude::*;

fn catalog() -> Result<Catalog, CatalogError> {
    Catalog::load(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalog.yml"))
}

fn records(file: &ExportedFile) -> Result<Vec<Vec<String>>, csv::Error> {
    let text = file.text();

    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes())
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect()
}

fn session_with_awkward_names()
-> Result<OrderSession<InMemoryHistory, FixedClock>, Box<dyn std::error::Error>> {
    let catalog = catalog()?;
    let user = catalog.user("CL-002").cloned().ok_or("missing user")?;
    let clock = FixedClock::new(
        "2026-01-09T23:15:00Z"
            .parse::<Timestamp>()?
            .to_zoned(TimeZone::fixed(jiff::tz::offset(-6))),
    );

    let mut session = OrderSession::new(user, InMemoryHistory::new(), clock);
    session.upsert(catalog.product("SH-001").ok_or("missing product")?, 3);
    session.upsert(catalog.product("CR-001").ok_or("missing product")?, 1);

    Ok(session)
}

#[test]
fn current_order_fields_survive_csv_parsing() -> TestResult {
    let session = session_with_awkward_names()?;
    let export = session.export_current();

    assert_eq!(export.filename, "Pedido_CL-002_2026-01-09.csv");

    let rows = records(&export)?;

    // The blank separator row is skipped by the reader.
    assert_eq!(rows[0], ["Cliente: Beto Ramírez (CL-002)"]);
    assert_eq!(rows[1], ["Fecha: 9/1/2026"]);
    assert_eq!(
        rows[2],
        ["ID", "Producto", "Categoría", "Precio Unitario", "Cantidad", "Total"]
    );
    assert_eq!(
        rows[3],
        ["SH-001", "Shampoo Herbal, 1L", "Cabello", "85.5", "3", "256.50"]
    );
    assert_eq!(
        rows[4],
        ["CR-001", "Crema Corporal \"Lior\"", "Cuerpo", "76.25", "1", "76.25"]
    );
    assert_eq!(rows[5], ["", "", "", "", "", "Subtotal", "332.75"]);
    assert_eq!(rows.len(), 6);

    Ok(())
}

#[test]
fn order_summary_fields_survive_csv_parsing() -> TestResult {
    let mut session = session_with_awkward_names()?;
    session.set_discount(DiscountTier::ThirtyPercent);

    let finalized = session.finalize()?;

    assert_eq!(finalized.export.filename, "Pedido de CL-002 del 9-1-2026.csv");

    let rows = records(&finalized.export)?;

    assert!(rows.iter().all(|row| row.first().is_some_and(|lead| lead == " ")));
    assert_eq!(rows[1], [" ", "Beto Ramírez"]);
    assert_eq!(
        rows[5],
        [" ", "SH-001", "Shampoo Herbal, 1L", "3", "85.50", "179.55", "30%"]
    );
    assert_eq!(
        rows[6],
        [" ", "CR-001", "Crema Corporal \"Lior\"", "1", "76.25", "53.38", "30%"]
    );

    Ok(())
}
