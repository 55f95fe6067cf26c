use std::collections::HashSet;

use polars::prelude::*;
use revenue_core::spine::build_spine;

fn days(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|d| d.to_string()).collect()
}

fn products() -> DataFrame {
    df!(
        "sku_id" => &["1", "2", "3"],
        "sku_description" => &["A", "B", "C"],
        "price" => &[10.0f64, 20.0, 30.0],
    )
    .unwrap()
}

#[test]
fn spine_covers_every_product_for_every_day() -> PolarsResult<()> {
    let day_ids = days(&["2025-01-01", "2025-01-02"]);
    let spine = build_spine(&products(), &day_ids)?;

    assert_eq!(spine.height(), 6);
    assert_eq!(spine.get_column_names(), ["sku_id", "date_id", "price"]);

    let sku = spine.column("sku_id")?.str()?;
    let date = spine.column("date_id")?.str()?;
    let pairs: HashSet<(String, String)> = (0..spine.height())
        .map(|idx| {
            (
                sku.get(idx).unwrap().to_string(),
                date.get(idx).unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(pairs.len(), 6);

    for sku_id in ["1", "2", "3"] {
        for day in &day_ids {
            assert!(pairs.contains(&(sku_id.to_string(), day.clone())));
        }
    }

    Ok(())
}

#[test]
fn spine_carries_product_price() -> PolarsResult<()> {
    let spine = build_spine(&products(), &days(&["2025-01-01", "2025-01-02"]))?;

    let sku = spine.column("sku_id")?.str()?;
    let price = spine.column("price")?.f64()?;
    for idx in 0..spine.height() {
        let expected = match sku.get(idx) {
            Some("1") => 10.0,
            Some("2") => 20.0,
            Some("3") => 30.0,
            other => panic!("unexpected sku {:?}", other),
        };
        assert_eq!(price.get(idx), Some(expected));
    }

    Ok(())
}

#[test]
fn empty_product_set_yields_empty_spine() -> PolarsResult<()> {
    let empty = df!(
        "sku_id" => Vec::<&str>::new(),
        "price" => Vec::<f64>::new(),
    )?;
    let spine = build_spine(&empty, &days(&["2025-01-01"]))?;

    assert_eq!(spine.height(), 0);
    assert_eq!(spine.width(), 3);
    Ok(())
}

#[test]
fn empty_date_list_yields_empty_spine() -> PolarsResult<()> {
    let spine = build_spine(&products(), &[])?;
    assert_eq!(spine.height(), 0);
    Ok(())
}
