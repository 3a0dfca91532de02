//! Fixtures shared by the unit and router tests.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream};
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};
use tempfile::TempDir;

use crate::config::Config;
use crate::models::orders::NewPrintFile;
use crate::state::AppState;

/// Fresh in-memory SQLite database with every migration applied.
pub async fn test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn test_config(upload_dir: &std::path::Path, extra: &[&str]) -> Config {
    let mut args = vec![
        "print-intake".to_string(),
        "--database-url".to_string(),
        "sqlite::memory:".to_string(),
        "--upload-dir".to_string(),
        upload_dir.display().to_string(),
        "--max-upload-mb".to_string(),
        "1".to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    <Config as clap::Parser>::try_parse_from(args).unwrap()
}

/// App state over a migrated database and a temporary upload directory.
pub async fn test_state(extra_args: &[&str]) -> (AppState, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir.path().join("uploads"), extra_args);
    (AppState::new(test_db().await, config), temp_dir)
}

pub fn new_file(name: &str, cost: Decimal) -> NewPrintFile {
    NewPrintFile {
        file_name_original: name.to_string(),
        file_path_saved: format!("0123456789abcdef0123456789abcdef_{name}"),
        page_count_original: 4,
        page_range: "1-4".to_string(),
        page_count_final: 4,
        copies: 1,
        print_color: false,
        print_duplex: false,
        file_cost: cost,
    }
}

/// A valid PDF with `pages` blank-ish text pages.
pub fn sample_pdf(pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let page_tree_id = doc.new_object_id();

    let font_id = doc.add_object(lopdf::Dictionary::from_iter([
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let resources_id = doc.add_object(lopdf::Dictionary::from_iter([(
        "Font",
        Object::Dictionary(lopdf::Dictionary::from_iter([("F1", Object::Reference(font_id))])),
    )]));

    let mut kids = Vec::with_capacity(pages);
    for number in 1..=pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("Page {number}"))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            lopdf::Dictionary::new(),
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(lopdf::Dictionary::from_iter([
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(page_tree_id)),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Reference(resources_id)),
            (
                "MediaBox",
                Object::Array(vec![0.into(), 0.into(), 612.into(), 792.into()]),
            ),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let page_tree = lopdf::Dictionary::from_iter([
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(kids.len() as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    doc.objects.insert(page_tree_id, Object::Dictionary(page_tree));

    let catalog_id = doc.add_object(lopdf::Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(page_tree_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut output = Vec::new();
    doc.save_to(&mut output).unwrap();
    output
}
