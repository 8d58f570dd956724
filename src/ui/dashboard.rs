use crate::model::{Company, Floor};
use crate::ui::app::{App, Focus, Modal};
use crate::ui::form::Form;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table,
    },
    Frame,
};

// Brandbook colors
#[allow(dead_code)]
const BRAND_BG: Color = Color::Rgb(0xED, 0xED, 0xED); // #ededed - background
const BRAND_DARK: Color = Color::Rgb(0x1F, 0x2F, 0x3C); // #1f2f3c - primary dark
const BRAND_ACCENT: Color = Color::Rgb(0x58, 0x6B, 0x71); // #586b71 - blue accent
const BRAND_SELECT_BG: Color = Color::Rgb(0xC3, 0xD3, 0xE0); // #c3d3e0 - selection background
const BRAND_GREEN: Color = Color::Rgb(0x82, 0x9A, 0x68); // #829a68 - green (fully paid)
const BRAND_ORANGE: Color = Color::Rgb(0x9E, 0x68, 0x3C); // #9e683c - orange (behind)
const BRAND_MUTED: Color = Color::Rgb(0x71, 0x65, 0x65); // #716565 - muted (footer)

// Styles
const HEADER_STYLE: Style = Style::new().fg(BRAND_DARK).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new()
    .bg(BRAND_SELECT_BG)
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD);

/// Green at 100%, blue from 50%, orange below.
fn percentage_color(pct: u32) -> Color {
    if pct == 100 {
        BRAND_GREEN
    } else if pct >= 50 {
        BRAND_ACCENT
    } else {
        BRAND_ORANGE
    }
}

fn money(value: f64) -> String {
    format!("₹{value:.2}")
}

pub fn draw_buildings(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Building list
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    let title = format!(" Site Ledger | {} buildings ", app.store.buildings().len());
    draw_header(frame, chunks[0], &title);
    draw_building_list(frame, chunks[1], app);
    draw_footer(
        frame,
        chunks[2],
        " ↑↓ Navigate | Enter Open | a Add | d Delete | q Quit ",
    );
}

fn draw_building_list(frame: &mut Frame, area: Rect, app: &App) {
    let buildings = app.store.buildings();

    if buildings.is_empty() {
        draw_empty_hint(frame, area, " Buildings (0) ", "No buildings yet — press a");
        return;
    }

    let visible_rows = (area.height as usize).saturating_sub(2);
    let scroll_offset = if app.selected_building >= visible_rows {
        app.selected_building - visible_rows + 1
    } else {
        0
    };

    let items: Vec<ListItem> = buildings
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_rows)
        .map(|(i, building)| {
            let is_selected = i == app.selected_building;
            let style = if is_selected {
                SELECTED_STYLE
            } else {
                Style::default()
            };
            let marker = if is_selected { " ◄" } else { "" };
            let pct = building.payment_percentage();

            let content = Line::from(vec![
                Span::styled(&building.name, style),
                Span::styled(
                    format!(" {} floors", building.floors.len()),
                    Style::default().fg(BRAND_MUTED),
                ),
                Span::styled(
                    format!(" Paid {pct}%"),
                    Style::default().fg(percentage_color(pct)),
                ),
                Span::styled(marker, Style::default().fg(BRAND_ORANGE)),
            ]);

            ListItem::new(content)
        })
        .collect();

    let title = format!(" Buildings ({}) ", buildings.len());
    let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(list, area);

    draw_scrollbar(frame, area, buildings.len(), visible_rows, app.selected_building);
}

pub fn draw_floors(frame: &mut Frame, app: &App) {
    let Some(building) = app.viewed_building() else {
        draw_not_found(frame, "Building not found", " Esc Back to Buildings | q Quit ");
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Floor list
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    let pct = building.payment_percentage();
    let title = format!(
        " {} | {} floors | Paid {}% ",
        building.name,
        building.floors.len(),
        pct
    );
    draw_header(frame, chunks[0], &title);

    if building.floors.is_empty() {
        draw_empty_hint(frame, chunks[1], " Floors (0) ", "No floors yet — press a");
    } else {
        draw_floor_list(frame, chunks[1], app, &building.floors);
    }

    draw_footer(
        frame,
        chunks[2],
        " ↑↓ Navigate | Enter Open | a Add Floor | Esc Back | q Quit ",
    );
}

fn draw_floor_list(frame: &mut Frame, area: Rect, app: &App, floors: &[Floor]) {
    let visible_rows = (area.height as usize).saturating_sub(2);
    let scroll_offset = if app.selected_floor >= visible_rows {
        app.selected_floor - visible_rows + 1
    } else {
        0
    };

    let items: Vec<ListItem> = floors
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_rows)
        .map(|(i, floor)| {
            let is_selected = i == app.selected_floor;
            let style = if is_selected {
                SELECTED_STYLE
            } else {
                Style::default()
            };
            let marker = if is_selected { " ◄" } else { "" };
            let pct = floor.payment_percentage();

            let content = Line::from(vec![
                Span::styled(&floor.name, style),
                Span::styled(
                    format!(
                        " {} / {}",
                        money(floor.paid_amount()),
                        money(floor.total_cost())
                    ),
                    Style::default().fg(BRAND_MUTED),
                ),
                Span::styled(
                    format!(" Paid {pct}%"),
                    Style::default().fg(percentage_color(pct)),
                ),
                Span::styled(marker, Style::default().fg(BRAND_ORANGE)),
            ]);

            ListItem::new(content)
        })
        .collect();

    let title = format!(" Floors ({}) ", floors.len());
    let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(list, area);

    draw_scrollbar(frame, area, floors.len(), visible_rows, app.selected_floor);
}

pub fn draw_companies(frame: &mut Frame, app: &App) {
    let Some(floor) = app.viewed_floor() else {
        draw_not_found(frame, "Floor not found", " Esc Back to Floors | q Quit ");
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3),      // Header
        Constraint::Percentage(40), // Companies summary table
        Constraint::Min(8),         // Selected company detail
        Constraint::Length(3),      // Footer
    ])
    .split(frame.area());

    let title = format!(
        " {} | Cost {} | Paid {} | {}% ",
        floor.name,
        money(floor.total_cost()),
        money(floor.paid_amount()),
        floor.payment_percentage()
    );
    draw_header(frame, chunks[0], &title);
    draw_company_table(frame, chunks[1], app, floor);
    draw_company_detail(frame, chunks[2], app);
    draw_footer(
        frame,
        chunks[3],
        " ←→ Focus | ↑↓ Navigate | Enter Expand | a Company | i Invoice | b Bill | Esc Back ",
    );
}

fn draw_company_table(frame: &mut Frame, area: Rect, app: &App, floor: &Floor) {
    let is_focused = app.focus == Focus::Companies;
    let border_style = if is_focused {
        Style::default().fg(BRAND_ORANGE)
    } else {
        Style::default()
    };

    if floor.companies.is_empty() {
        let block = Block::default()
            .title(" Companies (0) ")
            .borders(Borders::ALL)
            .border_style(border_style);
        let hint = Paragraph::new("No companies added yet. Press a to get started.")
            .style(Style::default().fg(BRAND_MUTED))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    // Subtract 3 for borders and the header row.
    let visible_rows = (area.height as usize).saturating_sub(3);
    let scroll_offset = if app.selected_company >= visible_rows {
        app.selected_company - visible_rows + 1
    } else {
        0
    };

    let header = Row::new(vec![
        "S.No.",
        "Company Name",
        "PO No.",
        "PO Value",
        "Total Amount",
    ])
    .style(HEADER_STYLE)
    .height(1);

    let rows: Vec<Row> = floor
        .companies
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_rows)
        .map(|(i, company)| {
            let is_selected = i == app.selected_company;
            let style = if is_selected && is_focused {
                SELECTED_STYLE
            } else if is_selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let chevron = if app.expanded_companies.contains(&company.id) {
                "▾ "
            } else {
                "▸ "
            };

            Row::new(vec![
                format!("{}", i + 1),
                format!("{chevron}{}", company.name),
                company.po_number.clone(),
                money(company.po_value),
                money(company.total_amount()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(34),
        Constraint::Percentage(22),
        Constraint::Percentage(22),
        Constraint::Percentage(22),
    ];

    let title = format!(" Companies ({}) ", floor.companies.len());
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(table, area);

    draw_scrollbar(
        frame,
        area,
        floor.companies.len(),
        visible_rows,
        app.selected_company,
    );
}

fn draw_company_detail(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Invoices;
    let border_style = if is_focused {
        Style::default().fg(BRAND_ORANGE)
    } else {
        Style::default()
    };

    let Some(company) = app.get_selected_company() else {
        let block = Block::default().title(" Invoices ").borders(Borders::ALL);
        let hint = Paragraph::new("Select a company above.")
            .style(Style::default().fg(BRAND_MUTED))
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let title = format!(" {} — Invoices ({}) ", company.name, company.invoices.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    if !app.expanded_companies.contains(&company.id) {
        let hint = Paragraph::new("Enter Expand | i Add Invoice")
            .style(Style::default().fg(BRAND_MUTED))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    if company.invoices.is_empty() {
        let hint = Paragraph::new("No invoices yet — press i")
            .style(Style::default().fg(BRAND_MUTED))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let (items, selected_item) = invoice_items(app, company);

    let visible_rows = (area.height as usize).saturating_sub(2);
    let scroll_offset = if selected_item >= visible_rows {
        selected_item - visible_rows + 1
    } else {
        0
    };

    let total = items.len();
    let list = List::new(items.into_iter().skip(scroll_offset).take(visible_rows)).block(block);
    frame.render_widget(list, area);

    draw_scrollbar(frame, area, total, visible_rows, selected_item);
}

/// Invoice lines with their bills nested under the expanded ones.
/// Returns the item index of the selected invoice for scroll tracking.
fn invoice_items<'a>(app: &App, company: &'a Company) -> (Vec<ListItem<'a>>, usize) {
    let mut items = Vec::new();
    let mut selected_item = 0;

    for (i, invoice) in company.invoices.iter().enumerate() {
        let is_selected = i == app.selected_invoice && app.focus == Focus::Invoices;
        if i == app.selected_invoice {
            selected_item = items.len();
        }

        let is_expanded = app.expanded_invoices.contains(&invoice.id);
        let chevron = if is_expanded { "▾ " } else { "▸ " };
        let style = if is_selected {
            SELECTED_STYLE
        } else {
            Style::default()
        };

        let mut spans = vec![
            Span::raw(chevron),
            Span::styled(&invoice.name, style),
            Span::raw(format!(" — {}", money(invoice.value))),
            Span::styled(
                format!(" ({})", invoice.date),
                Style::default().fg(BRAND_MUTED),
            ),
        ];
        if invoice.file_ref.is_some() {
            spans.push(Span::styled(
                " [file]",
                Style::default().fg(BRAND_GREEN),
            ));
        }
        items.push(ListItem::new(Line::from(spans)));

        if is_expanded {
            if invoice.bills.is_empty() {
                items.push(ListItem::new(Line::from(Span::styled(
                    "    no bills yet — press b",
                    Style::default().fg(BRAND_MUTED),
                ))));
            }
            for bill in &invoice.bills {
                let mut bill_spans = vec![
                    Span::raw("    • "),
                    Span::raw(&bill.name),
                    Span::raw(format!(" — {}", money(bill.value))),
                    Span::styled(
                        format!(" ({})", bill.date),
                        Style::default().fg(BRAND_MUTED),
                    ),
                ];
                if bill.file_ref.is_some() {
                    bill_spans.push(Span::styled(
                        " [file]",
                        Style::default().fg(BRAND_GREEN),
                    ));
                }
                items.push(ListItem::new(Line::from(bill_spans)));
            }
        }
    }

    (items, selected_item)
}

// ---- modals ----

pub fn draw_modal(frame: &mut Frame, modal: &Modal) {
    match modal {
        Modal::ConfirmDelete { name, .. } => draw_confirm_delete(frame, name),
        _ => {
            if let Some(form) = modal.form() {
                draw_form(frame, form);
            }
        }
    }
}

fn draw_confirm_delete(frame: &mut Frame, name: &str) {
    let area = centered_rect(52, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(format!("Delete '{name}' and everything in it?")),
        Line::from(""),
        Line::from(Span::styled(
            " y Delete | n Cancel ",
            Style::default().fg(BRAND_MUTED),
        )),
    ];
    let dialog = Paragraph::new(lines).block(
        Block::default()
            .title(" Delete Building ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BRAND_ORANGE)),
    );
    frame.render_widget(dialog, area);
}

fn draw_form(frame: &mut Frame, form: &Form) {
    let height = form.fields.len() as u16 + 4;
    let area = centered_rect(52, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let is_focused = i == form.focus;
            let marker = if is_focused { "> " } else { "  " };
            let cursor = if is_focused { "▏" } else { "" };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(BRAND_ORANGE)),
                Span::styled(
                    format!("{}: ", field.label),
                    Style::default().fg(BRAND_MUTED),
                ),
                Span::raw(&field.value),
                Span::styled(cursor, Style::default().fg(BRAND_ORANGE)),
            ])
        })
        .collect();

    match &form.error {
        Some(error) => lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(BRAND_ORANGE),
        ))),
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(Span::styled(
        " Tab Next | Enter Submit | Esc Cancel ",
        Style::default().fg(BRAND_MUTED),
    )));

    let dialog = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {} ", form.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BRAND_ORANGE)),
    );
    frame.render_widget(dialog, area);
}

// ---- shared chrome ----

fn draw_header(frame: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(title)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, help: &str) {
    let footer = Paragraph::new(help)
        .style(Style::default().fg(BRAND_MUTED))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn draw_empty_hint(frame: &mut Frame, area: Rect, title: &str, hint: &str) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let paragraph = Paragraph::new(hint)
        .style(Style::default().fg(BRAND_MUTED))
        .block(block);
    frame.render_widget(paragraph, area);
}

fn draw_not_found(frame: &mut Frame, message: &str, help: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(3),
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], " Site Ledger ");
    let body = Paragraph::new(message)
        .style(Style::default().fg(BRAND_ORANGE))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(body, chunks[1]);
    draw_footer(frame, chunks[2], help);
}

fn draw_scrollbar(
    frame: &mut Frame,
    area: Rect,
    total: usize,
    visible_rows: usize,
    position: usize,
) {
    if total <= visible_rows || area.height < 4 {
        return;
    }
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"));
    let mut scrollbar_state = ScrollbarState::new(total).position(position);

    let scrollbar_area = Rect {
        x: area.x + area.width - 1,
        y: area.y + 2,
        width: 1,
        height: area.height - 3,
    };
    frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
