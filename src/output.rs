//! This module is in charge of presenting selector tables and selection
//! results on the standard output

use physics_ids::{Mask, SelectorTable};

use serde_json::{json, Value};

/// Describe every selector of a table
pub fn print_table(table: &SelectorTable) {
    println!("{:<16} {:<9} {:<5} inputs", "selector", "object", "year");
    println!("---------------------------------------------");
    for (name, selector) in table.iter() {
        let inputs = selector
            .inputs()
            .iter()
            .map(|spec| format!("{} ({})", spec.name, spec.kind))
            .collect::<Vec<_>>()
            .join(", ");
        let year = if selector.is_year_dependent() { "yes" } else { "no" };
        println!("{:<16} {:<9} {:<5} {}", name, selector.object(), year, inputs);
    }
}

/// JSON form of a mask, with the same nesting as the input columns
pub fn mask_to_json(mask: &Mask) -> Value {
    let selected = mask.count_selected();
    let values = match mask.offsets() {
        Some(_) => Value::from(mask.events().map(<[bool]>::to_vec).collect::<Vec<_>>()),
        None => Value::from(mask.values().to_vec()),
    };
    json!({
        "selected": selected,
        "total": mask.len(),
        "mask": values,
    })
}

/// Print a mask as JSON
pub fn print_mask(mask: &Mask) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(&mask_to_json(mask))?);
    Ok(())
}
