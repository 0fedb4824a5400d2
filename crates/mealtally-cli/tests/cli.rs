use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const EXPORT: &str = "\
Restaurant order report
Outlet,Dhaba Express
From,2023-08-14
To,2023-08-20
Generated,2023-08-21
Order ID,Order-relay-time(ordered time),Item1-name_reward_type_quantity_price+Variants+Addons,,Total-bill-amount <bill>
1001,2023-08-16 13:10:00,Tawa Paratha_NA_2_90+Extra Butter,Raita_NA_1_30,245
1002,,Lassi_NA_1_60,,60
1003,2023-08-17 20:00:00,Tawa Paratha_NA_1_45,,45
";

const ORDER_TABLE: &str = r#"order_id,ordered_date_time,ordered_day,ordered_time,ordered_type,ordered_items_list,total_amount,promo
1,2023-08-16 13:20:00,Wednesday,01:20 PM,LUNCH,"[""Tawa Paratha 2"", ""Raita 1""]",₹601,-₹50
2,2023-08-17 20:05:00,Thursday,08:05 PM,DINNER,"[""Lassi 2""]",₹120,0
3,2023-08-22 12:30:00,Tuesday,12:30 PM,LUNCH,"[""Tawa Paratha 1""]",₹90,0
4,2023-08-23 13:00:00,Wednesday,01:00 PM,LUNCH,"[""Tawa Paratha 1""]",₹90,0
"#;

/// Temp workspace with an empty config file, so the user's config is never read.
fn workspace() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();
    let config = config.to_string_lossy().into_owned();
    (dir, config)
}

fn mealtally(config: &str) -> Command {
    let mut cmd = Command::cargo_bin("mealtally").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

/// Write a one-page PDF with a text layer, one line per entry.
fn write_receipt_pdf(path: &Path, lines: &[&str]) {
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), Object::Integer(12)]),
        Operation::new("Td", vec![Object::Integer(50), Object::Integer(780)]),
    ];
    for line in lines {
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("Td", vec![Object::Integer(0), Object::Integer(-14)]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(595),
            Object::Integer(842),
        ],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).unwrap();
}

fn receipt_lines(order_id: &str, ordered_at: &str, item: &str) -> Vec<String> {
    vec![
        format!("Zomato order: {}", order_id),
        "Spice Hub".to_string(),
        ordered_at.to_string(),
        "PAID".to_string(),
        "Order Summary".to_string(),
        item.to_string(),
        "Taxes".to_string(),
        "Rs 10".to_string(),
        "Total".to_string(),
        "Rs 210".to_string(),
    ]
}

fn write_receipt(dir: &Path, name: &str, order_id: &str, ordered_at: &str, item: &str) {
    let lines = receipt_lines(order_id, ordered_at, item);
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    write_receipt_pdf(&dir.join(name), &lines);
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap().replace("\r\n", "\n")
}

#[test]
fn export_writes_summaries() {
    let (dir, config) = workspace();
    let input = dir.path().join("orders.csv");
    let out = dir.path().join("result");
    fs::write(&input, EXPORT).unwrap();

    mealtally(&config)
        .arg("export")
        .arg(&input)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Read 3 orders, 2 on Wednesday"));

    assert_eq!(
        read(&out.join("item_summary.csv")),
        "item_name,item_quantity,week_day\n\
         Tawa Paratha,2,Wednesday\n\
         Raita,1,Wednesday\n\
         Lassi,1,Wednesday\n"
    );
    assert_eq!(
        read(&out.join("item_totals.csv")),
        "item_name,item_quantity\nLassi,1\nRaita,1\nTawa Paratha,3\n"
    );
    assert!(read(&out.join("order_summary.csv")).starts_with("order_id,ordered_date_time"));
}

#[test]
fn export_day_override() {
    let (dir, config) = workspace();
    let input = dir.path().join("orders.csv");
    let out = dir.path().join("result");
    fs::write(&input, EXPORT).unwrap();

    mealtally(&config)
        .args(["export", "--day", "Thursday", "--output-dir"])
        .arg(&out)
        .arg(&input)
        .assert()
        .success();

    assert_eq!(
        read(&out.join("item_summary.csv")),
        "item_name,item_quantity,week_day\nTawa Paratha,1,Thursday\n"
    );
}

#[test]
fn export_missing_column_fails() {
    let (dir, config) = workspace();
    let input = dir.path().join("orders.csv");
    fs::write(&input, EXPORT).unwrap();

    mealtally(&config)
        .args(["export", "--skip-rows", "0"])
        .arg(&input)
        .arg("--output-dir")
        .arg(dir.path().join("result"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Column not found"));
}

#[test]
fn export_rejects_invalid_config() {
    let (dir, _) = workspace();
    let config = dir.path().join("bad.json");
    fs::write(&config, r#"{"export": {"weekday": "Wed"}}"#).unwrap();
    let input = dir.path().join("orders.csv");
    fs::write(&input, EXPORT).unwrap();

    mealtally(config.to_string_lossy().as_ref())
        .arg("export")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error: export.weekday"));
}

#[test]
fn report_from_order_table() {
    let (dir, config) = workspace();
    let table = dir.path().join("order_counts.csv");
    let out = dir.path().join("result");
    fs::write(&table, ORDER_TABLE).unwrap();

    mealtally(&config)
        .args(["report", "--day", "Wednesday", "--meal", "lunch", "--sort", "NAME", "--output-dir"])
        .arg(&out)
        .arg(&table)
        .assert()
        .success();

    assert_eq!(
        read(&out.join("item_counts_Wednesday_LUNCH.csv")),
        "Item,Quantity\nRaita,1\nTawa Paratha,3\n"
    );
}

#[test]
fn report_rejects_unknown_day() {
    let (dir, config) = workspace();
    let table = dir.path().join("order_counts.csv");
    fs::write(&table, ORDER_TABLE).unwrap();

    mealtally(&config)
        .args(["report", "--day", "Wed", "--meal", "LUNCH"])
        .arg(&table)
        .assert()
        .failure();
}

#[test]
fn days_counts_span() {
    let (dir, config) = workspace();
    let table = dir.path().join("order_counts.csv");
    let out = dir.path().join("result");
    fs::write(&table, ORDER_TABLE).unwrap();

    mealtally(&config)
        .arg("days")
        .arg(&table)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Orders from 2023-08-16 to 2023-08-23"));

    assert_eq!(
        read(&out.join("day_counts.csv")),
        "Day,Count\nSunday,1\nMonday,1\nTuesday,1\nWednesday,2\nThursday,1\nFriday,1\nSaturday,1\n"
    );
}

#[test]
fn receipts_without_matches_fails() {
    let (dir, config) = workspace();
    let pattern = dir.path().join("*.pdf").to_string_lossy().into_owned();

    mealtally(&config)
        .arg("receipts")
        .arg(&pattern)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn receipts_reports_unreadable_files() {
    let (dir, config) = workspace();
    let receipts = dir.path().join("receipts");
    let out = dir.path().join("result");
    fs::create_dir_all(&receipts).unwrap();
    fs::write(receipts.join("broken.pdf"), "not a pdf").unwrap();

    mealtally(&config)
        .arg("receipts")
        .arg(receipts.join("*.pdf").to_string_lossy().as_ref())
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 successful, 1 failed"))
        .stdout(predicate::str::contains("broken.pdf"));

    assert!(out.join("order_counts.csv").exists());
    assert_eq!(read(&out.join("item_counts_Monday_LUNCH.csv")), "Item,Quantity\n");
}

#[test]
fn receipts_writes_weekday_meal_reports() {
    let (dir, config) = workspace();
    let receipts = dir.path().join("receipts");
    let out = dir.path().join("result");
    fs::create_dir_all(&receipts).unwrap();

    // File names sort differently from order times.
    write_receipt(&receipts, "1.pdf", "100", "23rd Aug 2023 at 12:10 PM", "Dal Makhani 1 x 200 Rs 200");
    write_receipt(&receipts, "2.pdf", "200", "16th Aug 2023 at 01:20 PM", "Dal Makhani 2 x 200 Rs 400");
    write_receipt(&receipts, "3.pdf", "300", "17th Aug 2023 at 08:05 PM", "Paneer Tikka 1 x 220 Rs 220");

    mealtally(&config)
        .arg("receipts")
        .arg(receipts.join("*.pdf").to_string_lossy().as_ref())
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 successful, 0 failed"));

    assert_eq!(
        read(&out.join("item_counts_Wednesday_LUNCH.csv")),
        "Item,Quantity\nDal Makhani,3\n"
    );
    assert_eq!(
        read(&out.join("item_counts_Thursday_DINNER.csv")),
        "Item,Quantity\nPaneer Tikka,1\n"
    );
    assert_eq!(
        read(&out.join("item_counts_Wednesday.csv")),
        "Item,Quantity,Ordered Day\nDal Makhani,3,Wednesday\n"
    );

    let order_ids: Vec<String> = read(&out.join("order_counts.csv"))
        .lines()
        .skip(1)
        .map(|l| l.split(',').next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(order_ids, vec!["200", "300", "100"]);
}

#[test]
fn receipts_malformed_timestamp_strict_and_lenient() {
    let (dir, config) = workspace();
    let receipts = dir.path().join("receipts");
    fs::create_dir_all(&receipts).unwrap();
    write_receipt(&receipts, "bad.pdf", "500", "32nd Aug 2023 at 01:20 PM", "Dal Makhani 1 x 200 Rs 200");
    let pattern = receipts.join("*.pdf").to_string_lossy().into_owned();

    let strict_out = dir.path().join("strict");
    mealtally(&config)
        .arg("receipts")
        .arg(&pattern)
        .arg("--output-dir")
        .arg(&strict_out)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 successful, 1 failed"))
        .stdout(predicate::str::contains("bad.pdf"));

    let lenient_out = dir.path().join("lenient");
    mealtally(&config)
        .args(["receipts", "--lenient-timestamps", "--output-dir"])
        .arg(&lenient_out)
        .arg(&pattern)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 0 failed"));

    let table = read(&lenient_out.join("order_counts.csv"));
    let row = table.lines().nth(1).unwrap();
    assert!(row.starts_with("500,,,,,"), "unexpected row {:?}", row);
    assert_eq!(
        read(&lenient_out.join("item_counts_Wednesday_LUNCH.csv")),
        "Item,Quantity\n"
    );
}

#[test]
fn process_missing_file_fails() {
    let (dir, config) = workspace();

    mealtally(&config)
        .arg("process")
        .arg(dir.path().join("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn config_path_is_printed() {
    Command::cargo_bin("mealtally")
        .unwrap()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}
