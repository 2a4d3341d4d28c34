//! Section Column Component
//!
//! A section with one lane per subsection and a trailing "Unassigned" lane.
//! The column and every lane are drop targets.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_target_mouseenter, make_on_target_mouseleave};

use ops_hub_core::{Classification, Section, SectionSpec, Subsection, ToolboxItem};

use crate::components::ToolboxCard;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

/// One lane of a column
#[component]
fn Lane(section: Section, subsection: Option<Subsection>) -> impl IntoView {
    let store = use_app_store();
    let dnd = use_app_context().dnd;

    let target = match subsection {
        Some(sub) => Classification::in_subsection(sub),
        None => Classification::section_only(section),
    };
    let label = subsection.map_or("Unassigned", |sub| sub.label());

    let lane_items = move || -> Vec<ToolboxItem> {
        store.board().with(|board| {
            let items = match subsection {
                Some(sub) => board.subsection(section, sub),
                None => board.unassigned(section),
            };
            items.into_iter().cloned().collect()
        })
    };

    let lane_class = move || {
        let mut c = String::from("kanban-lane");
        if subsection.is_none() { c.push_str(" unassigned"); }
        if dnd.is_target(&target) { c.push_str(" drop-target"); }
        c
    };

    view! {
        <div
            class=lane_class
            on:mouseenter=make_on_target_mouseenter(dnd, target)
            on:mouseleave=make_on_target_mouseleave(dnd, target)
        >
            <div class="kanban-lane-header">
                <span class="kanban-lane-title">{label}</span>
                <span class="kanban-lane-count">{move || lane_items().len()}</span>
            </div>
            <div class="kanban-lane-items">
                <For
                    each=lane_items
                    key=|item| (item.id, item.last_updated)
                    children=move |item| view! { <ToolboxCard item=item /> }
                />
            </div>
        </div>
    }
}

/// Board column for one section
#[component]
pub fn SectionColumn(spec: &'static SectionSpec) -> impl IntoView {
    let store = use_app_store();
    let dnd = use_app_context().dnd;
    let section = spec.section;
    let target = Classification::section_only(section);

    let count = move || store.board().with(|board| board.section(section).len());
    let column_class = move || {
        let mut c = format!("kanban-column color-{}", spec.color);
        if dnd.is_target(&target) { c.push_str(" drop-target"); }
        c
    };

    view! {
        <section
            class=column_class
            on:mouseenter=make_on_target_mouseenter(dnd, target)
            on:mouseleave=make_on_target_mouseleave(dnd, target)
        >
            <header class="kanban-column-header">
                <span class="kanban-column-icon" data-icon=spec.icon></span>
                <span class="kanban-column-title">{spec.label}</span>
                <span class="kanban-column-count">{count}</span>
            </header>
            {spec
                .subsections
                .iter()
                .map(|sub| view! { <Lane section=section subsection=Some(sub.subsection) /> })
                .collect_view()}
            <Lane section=section subsection=None />
        </section>
    }
}
