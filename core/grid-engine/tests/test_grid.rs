//! FILENAME: core/grid-engine/tests/test_grid.rs
//! End-to-end rendering of grids: data, grid data payloads and ranges.

mod common;

use common::{args, describe_cell, generated_grid, strings, text, Args};
use grid_engine::{
    Axis, AxisItem, AxisItems, CellValue, ColumnTotals, DataFormat, DataSource, Grid, GridLayout,
    GridRange, GridSpec, HeaderFormat, RowTotals, Totals,
};
use serde_json::json;

fn labelled_totals() -> Totals {
    Totals {
        column: Some(ColumnTotals {
            label: "列計".to_string(),
        }),
        row: Some(RowTotals {
            label: "総計".to_string(),
            ..RowTotals::default()
        }),
    }
}

// ========================================
// DATA
// ========================================

#[test]
fn generator_fills_every_item_pair() {
    let mut grid: Grid<Args> = Grid::new(GridSpec {
        layout: GridLayout {
            totals: labelled_totals(),
            ..GridLayout::default()
        },
        column: Axis::with_header(strings(&["行1", "行2"])),
        row: Axis::with_header(strings(&["列1", "列2"])),
        ..GridSpec::new(DataSource::generator(describe_cell))
    });

    grid.generate(&args()).unwrap();

    let expected = vec![
        vec![text(""), text("行1"), text("行2"), text("総計")],
        vec![text("列計"), text("=SUM(B3:B4)"), text("=SUM(C3:C4)"), text("=SUM(B2:C2)")],
        vec![text("列1"), text("fuga:行1:0/列1:0"), text("fuga:行2:1/列1:0"), text("=SUM(B3:C3)")],
        vec![text("列2"), text("fuga:行1:0/列2:1"), text("fuga:行2:1/列2:1"), text("=SUM(B4:C4)")],
    ];

    let data = grid.data().unwrap();
    assert_eq!(data, expected);
    assert_eq!(data.len() as u32, grid.row_length());
    assert_eq!(data[0].len() as u32, grid.column_length());
    assert_eq!(grid.data().unwrap(), expected);
}

#[test]
fn generator_without_items_produces_one_cell() {
    let mut grid: Grid<Args> = Grid::new(GridSpec::new(DataSource::generator(describe_cell)));

    grid.generate(&args()).unwrap();

    let data = grid.data().unwrap();
    assert_eq!(data, vec![vec![text("fuga:undefined:0/undefined:0")]]);
    assert_eq!(data.len() as u32, grid.row_length());
    assert_eq!(data[0].len() as u32, grid.column_length());
}

#[derive(Debug, Clone, PartialEq)]
struct Fuga {
    fuga: String,
}

impl AxisItem for Fuga {
    fn label(&self) -> CellValue {
        CellValue::text(self.fuga.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Ugu {
    ugu: String,
}

impl AxisItem for Ugu {
    fn label(&self) -> CellValue {
        CellValue::text(self.ugu.as_str())
    }
}

#[test]
fn custom_item_types_with_converters() {
    let columns = vec![
        Fuga { fuga: "行1".to_string() },
        Fuga { fuga: "行2".to_string() },
    ];
    let rows = vec![Ugu { ugu: "列1".to_string() }, Ugu { ugu: "列2".to_string() }];

    let mut grid: Grid<Args, Fuga, Ugu> = Grid::new(GridSpec {
        layout: GridLayout {
            totals: labelled_totals(),
            ..GridLayout::default()
        },
        column: AxisItems::new(columns)
            .with_header()
            .with_converter(|c: &Fuga, i| CellValue::Text(format!("{}:{}", c.fuga, i)))
            .into(),
        row: AxisItems::new(rows)
            .with_header()
            .with_converter(|r: &Ugu, j| CellValue::Text(format!("{}:{}", r.ugu, j)))
            .into(),
        ..GridSpec::new(DataSource::generator(
            |c: Option<&Fuga>, i, r: Option<&Ugu>, j, a: &Args| {
                let c = c.map_or("undefined", |c| c.fuga.as_str());
                let r = r.map_or("undefined", |r| r.ugu.as_str());
                CellValue::Text(format!("{}:{}:{}/{}:{}", a.hoge, c, i, r, j))
            },
        ))
    });

    grid.generate(&args()).unwrap();

    assert_eq!(
        grid.data().unwrap(),
        vec![
            vec![text(""), text("行1:0"), text("行2:1"), text("総計")],
            vec![text("列計"), text("=SUM(B3:B4)"), text("=SUM(C3:C4)"), text("=SUM(B2:C2)")],
            vec![text("列1:0"), text("fuga:行1:0/列1:0"), text("fuga:行2:1/列1:0"), text("=SUM(B3:C3)")],
            vec![text("列2:1"), text("fuga:行1:0/列2:1"), text("fuga:行2:1/列2:1"), text("=SUM(B4:C4)")],
        ]
    );
}

// ========================================
// GRID DATA
// ========================================

#[test]
fn grid_data_with_per_cell_formats() {
    let grid: Grid = Grid::new(GridSpec {
        data_format: Some(DataFormat::PerCell(vec![vec![
            json!({ "textDirection": "1" }),
            json!({ "textDirection": "2" }),
        ]])),
        ..GridSpec::new(DataSource::values(vec![vec![text("文字"), CellValue::from(1)]]))
    });

    assert_eq!(
        serde_json::to_value(grid.to_grid_data().unwrap()).unwrap(),
        json!({
            "rowData": [
                {
                    "values": [
                        {
                            "userEnteredFormat": { "textDirection": "1" },
                            "userEnteredValue": { "stringValue": "文字" }
                        },
                        {
                            "userEnteredFormat": { "textDirection": "2" },
                            "userEnteredValue": { "numberValue": 1.0 }
                        }
                    ]
                }
            ],
            "startColumn": 0,
            "startRow": 0
        })
    );
}

#[test]
fn empty_generated_value_renders_empty_cell() {
    let mut grid: Grid<()> = Grid::new(GridSpec::new(DataSource::generator(|_, _, _, _, _: &()| {
        CellValue::Empty
    })));

    assert_eq!(
        serde_json::to_value(grid.to_grid_data_with(&()).unwrap()).unwrap(),
        json!({
            "rowData": [ { "values": [ {} ] } ],
            "startColumn": 0,
            "startRow": 0
        })
    );
}

#[test]
fn grid_data_with_every_format() {
    let mut grid: Grid<Args> = Grid::new(GridSpec {
        layout: GridLayout {
            column_pixel_size: Some(7),
            totals: Totals {
                column: Some(ColumnTotals::default()),
                row: Some(RowTotals {
                    pixel_size: Some(8),
                    ..RowTotals::default()
                }),
            },
            ..GridLayout::default()
        },
        column: AxisItems::new(strings(&["行1", "行2", "行3"]))
            .with_header_format(HeaderFormat::Uniform(json!({ "textFormat": { "bold": true } })))
            .into(),
        row: AxisItems::new(strings(&["列1", "列2"]))
            .with_header_format(HeaderFormat::PerIndex(vec![
                json!({ "textFormat": { "fontSize": 1 } }),
                json!({ "textFormat": { "fontSize": 2 } }),
            ]))
            .into(),
        data_format: Some(DataFormat::generated(|c: Option<&String>, i, r: Option<&String>, j| {
            let c = c.map_or("", String::as_str);
            let r = r.map_or("", String::as_str);
            Some(json!({ "textDirection": format!("{}:{}/{}:{}", c, i, r, j) }))
        })),
        ..GridSpec::new(DataSource::generator(describe_cell))
    });

    let bold = json!({ "textFormat": { "bold": true } });
    let data_cell = |c: &str, i: usize, r: &str, j: usize| {
        json!({
            "userEnteredFormat": { "textDirection": format!("{}:{}/{}:{}", c, i, r, j) },
            "userEnteredValue": { "stringValue": format!("fuga:{}:{}/{}:{}", c, i, r, j) }
        })
    };
    let formula = |f: &str| json!({ "userEnteredValue": { "formulaValue": f } });

    assert_eq!(
        serde_json::to_value(grid.to_grid_data_with(&args()).unwrap()).unwrap(),
        json!({
            "columnMetadata": [
                {},
                { "pixelSize": 7 },
                { "pixelSize": 7 },
                { "pixelSize": 7 },
                { "pixelSize": 8 }
            ],
            "rowData": [
                {
                    "values": [
                        { "userEnteredValue": { "stringValue": "" } },
                        { "userEnteredFormat": bold, "userEnteredValue": { "stringValue": "行1" } },
                        { "userEnteredFormat": bold, "userEnteredValue": { "stringValue": "行2" } },
                        { "userEnteredFormat": bold, "userEnteredValue": { "stringValue": "行3" } },
                        { "userEnteredValue": { "stringValue": "SUM" } }
                    ]
                },
                {
                    "values": [
                        { "userEnteredValue": { "stringValue": "SUM" } },
                        formula("=SUM(B3:B4)"),
                        formula("=SUM(C3:C4)"),
                        formula("=SUM(D3:D4)"),
                        formula("=SUM(B2:D2)")
                    ]
                },
                {
                    "values": [
                        {
                            "userEnteredFormat": { "textFormat": { "fontSize": 1 } },
                            "userEnteredValue": { "stringValue": "列1" }
                        },
                        data_cell("行1", 0, "列1", 0),
                        data_cell("行2", 1, "列1", 0),
                        data_cell("行3", 2, "列1", 0),
                        formula("=SUM(B3:D3)")
                    ]
                },
                {
                    "values": [
                        {
                            "userEnteredFormat": { "textFormat": { "fontSize": 2 } },
                            "userEnteredValue": { "stringValue": "列2" }
                        },
                        data_cell("行1", 0, "列2", 1),
                        data_cell("行2", 1, "列2", 1),
                        data_cell("行3", 2, "列2", 1),
                        formula("=SUM(B4:D4)")
                    ]
                }
            ],
            "startColumn": 0,
            "startRow": 0
        })
    );
}

#[test]
fn to_grid_data_with_generates_once() {
    let mut grid = generated_grid(None, &["a"], &["x"]);
    assert!(!grid.is_ready());

    let first = grid.to_grid_data_with(&args()).unwrap();
    assert!(grid.is_ready());

    let other = Args {
        hoge: "piyo".to_string(),
    };
    assert_eq!(grid.to_grid_data_with(&other).unwrap(), first);
}

// ========================================
// RANGES
// ========================================

#[test]
fn to_range_quotes_sheet() {
    let grid = generated_grid(Some("シート"), &["行1", "行2"], &["列1", "列2"]);
    assert_eq!(grid.to_range(), "'シート'!A1:D4");
    assert_eq!(grid.to_local_range(), "A1:D4");
}

#[test]
fn to_grid_range_is_half_open() {
    let grid = generated_grid(Some("シート"), &["行1", "行2"], &["列1", "列2", "列3"]);
    assert_eq!(
        grid.to_grid_range(),
        GridRange {
            start_row_index: 0,
            end_row_index: 5,
            start_column_index: 0,
            end_column_index: 4,
        }
    );
}

#[test]
fn layout_deserializes_with_defaults() {
    let layout: GridLayout = serde_json::from_value(json!({
        "sheet": "Data",
        "start_column": 2,
        "totals": { "row": {} }
    }))
    .unwrap();

    assert_eq!(layout.sheet.as_deref(), Some("Data"));
    assert_eq!(layout.start_column, 2);
    assert_eq!(layout.start_row, 0);
    assert_eq!(layout.totals.column, None);
    assert_eq!(layout.totals.row, Some(RowTotals::default()));
}
