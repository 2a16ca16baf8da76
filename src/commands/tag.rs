//! Tag and remove commands - edit the items of a store

use crate::{
    TaggroupError,
    db::{DbError, ItemStore},
    model::Scalar,
};
use tracing::debug;

type Result<T> = std::result::Result<T, TaggroupError>;

/// Find the stored id an argument refers to
///
/// An argument spelling an integer names the integer id when one is stored,
/// otherwise the text id.
///
/// # Errors
///
/// Returns `DbError::ItemNotFound` if neither id is stored.
pub fn resolve_id(store: &ItemStore, arg: &str) -> Result<Scalar> {
    let inferred = Scalar::infer(arg);
    if store.contains(&inferred)? {
        return Ok(inferred);
    }

    let text = Scalar::from(arg);
    if text != inferred && store.contains(&text)? {
        return Ok(text);
    }

    Err(DbError::ItemNotFound(arg.to_string()).into())
}

/// Execute the tag command
///
/// Each assignment replaces the tag's value, or with `add` appends to it.
///
/// # Errors
///
/// Returns `TaggroupError` if no assignment is given, the item is not stored
/// or the store fails.
pub fn execute(store: &ItemStore, id: &str, assignments: &[(String, Scalar)], add: bool, quiet: bool) -> Result<()> {
    if assignments.is_empty() {
        return Err(TaggroupError::InvalidInput("No tags provided".into()));
    }

    let id = resolve_id(store, id)?;
    for (tag, value) in assignments {
        debug!(id = %id, tag = %tag, value = %value, add, "updating tag");
        if add {
            store.add_tag_value(&id, tag, value.clone())?;
        } else {
            store.set_tag_value(&id, tag, value.clone())?;
        }
    }
    store.flush()?;

    if !quiet {
        let applied: Vec<String> = assignments.iter().map(|(tag, value)| format!("{tag}={value}")).collect();
        let verb = if add { "Added to" } else { "Tagged" };
        println!("{verb} {id}: {}", applied.join(", "));
    }
    Ok(())
}

/// Execute the remove command
///
/// # Errors
///
/// Returns `TaggroupError` if the item is not stored or the store fails.
pub fn remove(store: &ItemStore, id: &str, quiet: bool) -> Result<()> {
    let id = resolve_id(store, id)?;
    if store.remove(&id)? {
        store.flush()?;
        if !quiet {
            println!("Removed {id}");
        }
    }
    Ok(())
}
