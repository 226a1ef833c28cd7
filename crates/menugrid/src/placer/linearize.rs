//! Phase A: linearization.
//!
//! Flattens sections (and nested subsections) into a single ordered token
//! stream. This stream IS the reading-order contract: the final item-tile
//! sequence, sorted by `(page_index, y, x)`, must reproduce it exactly.
//!
//! Traversal is an explicit iterative preorder over a stack, so engine stack
//! depth is independent of menu authoring depth.

use crate::models::menu::{Item, NormalizedMenu, Section};

/// One element of the flattened stream.
#[derive(Debug, Clone, Copy)]
pub enum LayoutToken<'a> {
    SectionHeader { section: &'a Section },
    Item { section: &'a Section, item: &'a Item },
}

/// Flattens the menu into reading order: sections by `sort_order`, items by
/// `sort_order` within each, subsections (preorder) after their parent's own
/// items.
///
/// A section with no direct items emits no header of its own; a header with
/// nothing below it would be a widow by construction. Its subsections still
/// emit theirs, and the menu validator flags the empty section advisorily.
pub fn linearize(menu: &NormalizedMenu) -> Vec<LayoutToken<'_>> {
    let mut tokens = Vec::new();

    let mut stack: Vec<&Section> = Vec::new();
    push_sorted_reversed(&mut stack, &menu.sections);

    while let Some(section) = stack.pop() {
        if !section.items.is_empty() {
            tokens.push(LayoutToken::SectionHeader { section });

            let mut items: Vec<&Item> = section.items.iter().collect();
            items.sort_by_key(|item| item.sort_order);
            for item in items {
                tokens.push(LayoutToken::Item { section, item });
            }
        }

        push_sorted_reversed(&mut stack, &section.subsections);
    }

    tokens
}

/// Pushes sections in reverse `sort_order` so the stack pops them in order.
fn push_sorted_reversed<'a>(stack: &mut Vec<&'a Section>, sections: &'a [Section]) {
    let mut sorted: Vec<&Section> = sections.iter().collect();
    sorted.sort_by_key(|section| section.sort_order);
    stack.extend(sorted.into_iter().rev());
}
