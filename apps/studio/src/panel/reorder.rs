use crate::models::section::Section;
use crate::models::server::SectionOrder;

/// Removes the element at `from` and reinserts it at `to`. Not a swap.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut next = items.to_vec();
    if from >= next.len() || to >= next.len() || from == to {
        return next;
    }
    let item = next.remove(from);
    next.insert(to, item);
    next
}

/// Drag handle id: the backend id, or a positional placeholder for unsaved sections.
pub fn drag_id(section: &Section, index: usize) -> String {
    match &section.id {
        Some(id) => id.clone(),
        None => format!("temp-{index}"),
    }
}

/// Persisted sections with their new positions. Unsaved sections are skipped.
pub fn section_orders(sections: &[Section]) -> Vec<SectionOrder> {
    sections
        .iter()
        .filter_map(|section| section.id.clone())
        .enumerate()
        .map(|(order, id)| SectionOrder { id, order })
        .collect()
}
