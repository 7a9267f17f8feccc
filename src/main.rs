use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Instant;

use tabledit::{
    AppConfig, Bus, Coordinator, FieldSet, FormValidator, MemoryApi, ModalForm, Record,
    ResourceApi, SurfaceEvent, TableController, TextSurface, ToastLog, Value,
};

const CONFIG: &str = r#"
api_url: memory://posts
rows_per_page: 5
locale: en
modal_title: Edit article
columns:
  - key: id
    label: ID
  - key: title
    label: Title
  - key: published
    label: Published
form:
  - name: title
    kind: text
    label: Title
    placeholder: Enter a title
  - name: published
    kind: checkbox
    label: Published
validation:
  title: required|min:5|max:50
"#;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_yaml(CONFIG)?;

    let api = MemoryApi::with_records(sample_posts());
    let initial = api.list()?;

    let bus = Rc::new(Bus::new());
    let table = Rc::new(RefCell::new(
        TableController::new(Box::new(TextSurface::new(io::stdout())), config.rows_per_page)
            .with_columns(config.columns.clone()),
    ));

    let mut fields = FieldSet::new();
    fields.add_fields(config.form.clone());
    let validator = FormValidator::new(&config.validation, &config.locale)
        .with_observe_on_input(config.observe_on_input)
        .with_debounce_delay(config.debounce());
    let title = config.modal_title.clone().unwrap_or_else(|| "Edit".to_string());
    let form = Rc::new(RefCell::new(ModalForm::new(title, fields, validator)));

    let toasts = ToastLog::new();
    let coordinator = Rc::new(RefCell::new(Coordinator::new(
        Box::new(api),
        table.clone(),
        form.clone(),
        Box::new(toasts.clone()),
    )));

    bus.subscribe(table.clone());
    bus.subscribe(coordinator);

    println!("== initial load ==");
    table.borrow_mut().load(initial);

    println!("\n== create a new article ==");
    let intents = table.borrow_mut().handle_surface_event(SurfaceEvent::AddClicked);
    for intent in intents {
        bus.notify(intent);
    }
    form.borrow_mut()
        .set_value("title", Value::from("A brand new article"), Instant::now());
    let submitted = form.borrow_mut().submit();
    if let Some(notification) = submitted {
        bus.notify(notification);
    }

    println!("\n== sort by title ==");
    let intents = table.borrow_mut().handle_surface_event(SurfaceEvent::SortClicked {
        column: "title".to_string(),
    });
    for intent in intents {
        bus.notify(intent);
    }

    println!("\n== delete article 1 ==");
    let intents = table
        .borrow_mut()
        .handle_surface_event(SurfaceEvent::DeleteClicked { id: 1 });
    for intent in intents {
        bus.notify(intent);
    }

    println!();
    for toast in toasts.entries() {
        println!("toast: {}", toast.message);
    }

    Ok(())
}

fn sample_posts() -> Vec<Record> {
    vec![
        Record::with_id(1)
            .set_field("title", "Observer pattern notes")
            .set_field("published", true),
        Record::with_id(2)
            .set_field("title", "Pagination arithmetic")
            .set_field("published", false),
        Record::with_id(3)
            .set_field("title", "Debounced validation")
            .set_field("published", true),
        Record::with_id(4)
            .set_field("title", "Modal forms without frameworks")
            .set_field("published", false),
        Record::with_id(5)
            .set_field("title", "Toast semantics")
            .set_field("published", true),
    ]
}
