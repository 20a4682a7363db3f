//! Integration tests for the facade crate
//!
//! These tests verify that the prelude alone is enough to:
//! 1. Mount an application and keep its template in sync with data
//! 2. Drive the reactive engine directly without any DOM

use std::cell::RefCell;
use std::rc::Rc;

use rstest::*;
use serde_json::json;
use vellum::prelude::*;

#[rstest]
fn test_prelude_mounts_and_renders() {
	let document = Document::parse(
		r#"<div id="app"><input id="name" v-model="user.name"><p id="greeting">{{ greeting }}</p></div>"#,
	);
	let app = App::mount(
		&document,
		AppOptions::new("#app")
			.data(json!({ "user": { "name": "Alice" } }))
			.computed(
				"greeting",
				Computed::getter(|vm| Ok(format!("Hello, {}", vm.get_path("user.name")?).into())),
			),
	)
	.unwrap();
	let greeting = document.query_selector("#greeting").unwrap();
	assert_eq!(greeting.text_content(), "Hello, Alice");

	document.query_selector("#name").unwrap().input("Bob").unwrap();

	assert_eq!(greeting.text_content(), "Hello, Bob");
	assert_eq!(app.view_model().data().to_json(), json!({ "user": { "name": "Bob" } }));
}

#[rstest]
fn test_reactive_engine_without_dom() {
	let data = ReactiveObject::from_json(json!({ "a": { "b": 1 } })).unwrap();
	let seen = Rc::new(RefCell::new(Vec::new()));
	let sink = seen.clone();
	let root: Rc<dyn PathRoot> = Rc::new(data.clone());
	let _observer = Observer::new(root, "a.b", move |value| {
		sink.borrow_mut().push(value.to_display_string());
		Ok(())
	})
	.unwrap();

	let path: Path = "a.b".parse().unwrap();
	set_path(&data, &path, 2).unwrap();

	assert_eq!(get_path(&data, &path).unwrap(), 2.into());
	assert_eq!(*seen.borrow(), vec!["2"]);
}
