//! End-to-end console flows driven through the in-memory transport.
//!
//! Actions are executed synchronously: worker requests go straight to
//! `TransportWorker::handle_message` and exports are written to a temp dir,
//! with outcomes fed back as events, the same way the binary does it.

use catalog_console::app::command::parse_command;
use catalog_console::app::notification::NotificationKind;
use catalog_console::transport::InMemoryProductApi;
use catalog_console::ui::{helpers::strip_ansi, render};
use catalog_console::worker::TransportWorker;
use catalog_console::{handle_event, Action, AppState, Category, Event, Product, Theme, ViewMode};
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::path::Path;
use std::time::Instant;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn catalog() -> Vec<Product> {
    let names = [
        ("Classic Red Shirt", 30.0),
        ("Blue Denim Jacket", 85.0),
        ("Leather Boots", 120.0),
        ("Wool Scarf", 18.5),
        ("Red Running Shoes", 64.0),
        ("Silk Tie", 22.0),
        ("Canvas Backpack", 45.0),
        ("Cotton Socks", 6.0),
        ("Rain Coat", 99.0),
        ("Straw Hat", 15.0),
        ("Linen Pants", 52.0),
        ("Red Beanie", 12.0),
    ];
    names
        .iter()
        .zip(1..)
        .map(|(&(title, price), id)| Product {
            id,
            title: title.to_string(),
            price,
            description: format!("{title} description"),
            category: Some(Category {
                id: id % 3 + 1,
                name: ["Clothes", "Shoes", "Others"][usize::try_from(id % 3).unwrap()].to_string(),
            }),
            images: vec![format!("[\"https://img.example/{id}.png\"]")],
        })
        .collect()
}

struct Harness {
    state: AppState,
    worker: TransportWorker,
    export_dir: tempfile::TempDir,
}

impl Harness {
    fn new(api: InMemoryProductApi) -> Self {
        let mut harness = Self {
            state: AppState::new(Theme::default()),
            worker: TransportWorker::new(Box::new(api)),
            export_dir: tempfile::tempdir().unwrap(),
        };
        harness.send(Event::Load);
        harness
    }

    fn send(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let (_, actions) = handle_event(&mut self.state, &event).unwrap();
            for action in actions {
                match action {
                    Action::Quit => {}
                    Action::PostToWorker(request) => {
                        queue.push_back(Event::TransportResponse(self.worker.handle_message(request)));
                    }
                    Action::Export(export) => {
                        let event = match export.write_to(self.export_dir.path()) {
                            Ok(path) => Event::ExportWritten {
                                path,
                                count: export.count,
                            },
                            Err(e) => Event::ExportFailed { message: e.to_string() },
                        };
                        queue.push_back(event);
                    }
                }
            }
        }
    }

    fn command(&mut self, line: &str) {
        let event = parse_command(line, Instant::now(), today()).unwrap().unwrap();
        self.send(event);
    }

    fn visible_titles(&self) -> Vec<String> {
        self.state
            .pipeline
            .current_page_slice()
            .iter()
            .map(|p| p.title.clone())
            .collect()
    }

    fn screen(&self) -> String {
        let mut out = Vec::new();
        render(&mut out, &self.state, 30, 120, today()).unwrap();
        strip_ansi(&String::from_utf8(out).unwrap())
    }
}

#[test]
fn load_search_sort_and_page() {
    let mut console = Harness::new(InMemoryProductApi::with_products(catalog()));
    assert!(!console.state.is_loading());
    assert_eq!(console.state.pipeline.total_pages(), 2);

    console.command("search red");
    console.command("sort price");
    assert_eq!(
        console.visible_titles(),
        vec!["Red Beanie", "Classic Red Shirt", "Red Running Shoes"]
    );

    console.command("sort price");
    assert_eq!(console.visible_titles()[0], "Red Running Shoes");

    console.command("search");
    console.command("size 5");
    console.command("page 3");
    assert_eq!(console.state.pipeline.pagination().page_index, 3);
    assert_eq!(console.visible_titles().len(), 2);

    console.command("page 9");
    assert_eq!(console.state.pipeline.pagination().page_index, 3);
}

#[test]
fn create_edit_and_delete_through_forms() {
    let mut console = Harness::new(InMemoryProductApi::with_products(catalog()));

    console.command("new");
    console.command("set title Travel Mug");
    console.command("set price 14.25");
    console.command("set images https://img.example/mug.png, https://img.example/mug2.png");
    console.command("save");

    assert_eq!(console.state.view_mode, ViewMode::Table);
    let created = console.state.pipeline.filtered()[0].clone();
    assert_eq!(created.id, 13);
    assert_eq!(created.title, "Travel Mug");
    assert_eq!(created.images.len(), 2);
    assert_eq!(console.state.pipeline.stats().total_count, 13);

    console.command("view 13");
    console.command("edit");
    console.command("set price 16");
    console.command("save");
    assert_eq!(console.state.view_mode, ViewMode::Table);
    assert!((console.state.pipeline.filtered()[0].price - 16.0).abs() < f64::EPSILON);

    console.command("delete 13");
    assert!(console.screen().contains("Delete #13 \"Travel Mug\"?"));
    console.command("yes");
    assert!(!console.state.pipeline.contains(13));
    assert_eq!(console.state.pending_delete, None);
    assert_eq!(
        console.state.notification.as_ref().unwrap().title,
        "Product deleted"
    );
}

#[test]
fn failed_load_can_be_retried() {
    let mut api = InMemoryProductApi::with_products(catalog());
    api.fail_next("connection reset");
    let mut console = Harness {
        state: AppState::new(Theme::default()),
        worker: TransportWorker::new(Box::new(api)),
        export_dir: tempfile::tempdir().unwrap(),
    };

    console.send(Event::Load);
    let notification = console.state.notification.clone().unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.title, "Failed to load products");
    assert!(console.state.pipeline.dataset().is_empty());
    assert!(console.screen().contains("No products"));

    console.send(Event::Load);
    assert_eq!(console.state.pipeline.dataset().len(), 12);
}

#[test]
fn export_writes_current_page() {
    let mut console = Harness::new(InMemoryProductApi::with_products(catalog()));
    console.command("next");
    console.command("export");

    let notification = console.state.notification.clone().unwrap();
    assert_eq!(notification.title, "Exported 2 products");

    let path = console
        .export_dir
        .path()
        .join("products_page_2_2024-06-15.csv");
    let contents = std::fs::read_to_string(Path::new(&path)).unwrap();
    assert!(contents.starts_with("\u{feff}ID,Title,Price,Category,Description,Images\n"));
    assert!(contents.contains("12,\"Red Beanie\",12,\"Clothes\""));
    assert_eq!(contents.lines().count(), 3);
}

#[test]
fn debounced_typing_applies_after_pause() {
    let mut console = Harness::new(InMemoryProductApi::with_products(catalog()));
    let start = Instant::now();

    console.send(Event::SearchInput {
        term: "boots".to_string(),
        at: start,
    });
    assert_eq!(console.state.pipeline.filtered().len(), 12);
    assert!(console.screen().contains("Search: boots ..."));

    console.send(Event::Tick {
        now: start + std::time::Duration::from_millis(350),
    });
    assert_eq!(console.visible_titles(), vec!["Leather Boots"]);
}
