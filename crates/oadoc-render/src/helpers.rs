use minijinja::value::{Value, ValueKind};
use minijinja::{Environment, Error, ErrorKind};

/// Register the helpers every template set can rely on.
pub fn register(env: &mut Environment<'_>) {
    env.add_function("eq", eq);
    env.add_function("includes", includes);
    env.add_filter("lowercase", lowercase);
    env.add_filter("uppercase", uppercase);
    env.add_filter("json", json);
}

fn eq(a: Value, b: Value) -> bool {
    a == b
}

/// `false` for anything that isn't a list.
fn includes(list: Value, value: Value) -> bool {
    if list.kind() != ValueKind::Seq {
        return false;
    }
    list.try_iter()
        .map(|mut items| items.any(|item| item == value))
        .unwrap_or(false)
}

fn lowercase(value: Value) -> String {
    value.to_string().to_lowercase()
}

fn uppercase(value: Value) -> String {
    value.to_string().to_uppercase()
}

/// Pretty-printed JSON with two-space indentation.
fn json(value: Value) -> Result<String, Error> {
    serde_json::to_string_pretty(&value).map_err(|err| {
        Error::new(ErrorKind::InvalidOperation, "cannot serialize value to JSON").with_source(err)
    })
}
