use prism_derive::prism_error;
use std::borrow::Cow;

#[prism_error]
pub enum CatalogError {
    #[error("Catalog read failed{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unknown record type{}: {name}", format_context(.context))]
    UnknownType { name: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read(path: &str) -> Result<String, CatalogError> {
    let text = std::fs::read_to_string(path).context("Reading catalog")?;
    Ok(text)
}

fn main() {
    let err = read("/definitely/not/here.json").unwrap_err();
    assert_eq!(err.kind(), "Io");
    assert!(err.to_string().starts_with("Catalog read failed (Reading catalog): "));

    let internal: CatalogError = "boom".into();
    assert_eq!(internal.kind(), "Internal");

    let unknown: Result<(), CatalogError> =
        Err(CatalogError::UnknownType { name: "Widget".to_owned(), context: None });
    let unknown = unknown.context("Resolving nested model").unwrap_err();
    assert_eq!(unknown.to_string(), "Unknown record type (Resolving nested model): Widget");
}
