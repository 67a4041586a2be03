use eframe::egui::{self, RichText, Ui};

use paper_atlas::graph::LinkKind;
use paper_atlas::truncate_chars;

use super::super::ViewModel;

const NEIGHBOR_TITLE_CHARS: usize = 56;

struct NeighborRow {
    index: usize,
    title: String,
    kind: LinkKind,
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selected paper");
        ui.add_space(6.0);

        let Some(node) = self.viewport.selected_node() else {
            ui.label("Select a paper in the graph or search by title.");
            return;
        };

        ui.label(RichText::new(node.title.as_str()).strong());
        if let Some(authors) = &node.authors {
            ui.small(authors.as_str());
        }
        ui.add_space(6.0);

        if let Some(year) = node.year {
            ui.label(format!("Year: {year}"));
        }
        ui.label(format!("Citations: {}", node.citation_count));
        ui.label(format!("References: {}", node.reference_count));
        ui.label(format!("Influence: {}", node.influence))
            .on_hover_text("Citations plus references; drives node size and colour.");

        if !node.concepts.is_empty() {
            ui.label(format!("Concepts: {}", node.concepts.join(", ")));
        }
        if let Some(doi) = &node.doi {
            ui.hyperlink_to(format!("DOI: {doi}"), format!("https://doi.org/{doi}"));
        }
        if let Some(url) = &node.url {
            ui.hyperlink_to("Open paper", url.as_str());
        }

        let graph = self.viewport.graph();
        let mut neighbors = graph
            .neighbors(&node.id)
            .filter_map(|(other_id, link)| {
                let index = graph.index_of(other_id)?;
                Some(NeighborRow {
                    index,
                    title: graph.nodes[index].title.clone(),
                    kind: link.kind,
                })
            })
            .collect::<Vec<_>>();
        neighbors.sort_by(|a, b| {
            let a_strength = a.kind.strength().unwrap_or(f32::INFINITY);
            let b_strength = b.kind.strength().unwrap_or(f32::INFINITY);
            b_strength
                .total_cmp(&a_strength)
                .then_with(|| a.title.cmp(&b.title))
        });

        ui.separator();
        ui.label(RichText::new(format!("Linked papers ({})", neighbors.len())).strong());
        if neighbors.is_empty() {
            ui.label("No links to other papers in this corpus.");
            return;
        }

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_salt("neighbor_scroll")
            .max_height(360.0)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for row in &neighbors {
                    let tag = match row.kind {
                        LinkKind::Reference => row.kind.label().to_owned(),
                        LinkKind::Similar { strength } => {
                            format!("{} {strength:.2}", row.kind.label())
                        }
                    };
                    let text = format!(
                        "{}  [{tag}]",
                        truncate_chars(&row.title, NEIGHBOR_TITLE_CHARS)
                    );
                    if ui.link(text).on_hover_text(row.title.as_str()).clicked() {
                        clicked = Some(row.index);
                    }
                }
            });

        if let Some(index) = clicked {
            let now = ui.input(|input| input.time);
            self.viewport.focus_node(index, now);
        }
    }
}
