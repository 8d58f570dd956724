use crate::model::{Building, Company, Floor, Invoice};
use crate::store::SiteStore;
use crate::ui::form::Form;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};
use std::collections::HashSet;

/// The three screens, addressed by record id path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Buildings,
    Floors {
        building_id: u64,
    },
    Companies {
        building_id: u64,
        floor_id: u64,
    },
}

/// Which column of the companies screen reacts to up/down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Companies,
    Invoices,
}

/// The open overlay, carrying the id of the record it is attached to.
#[derive(Debug)]
pub enum Modal {
    AddBuilding(Form),
    AddFloor { building_id: u64, form: Form },
    AddCompany { floor_id: u64, form: Form },
    AddInvoice { company_id: u64, form: Form },
    AddBill { invoice_id: u64, form: Form },
    ConfirmDelete { building_id: u64, name: String },
}

impl Modal {
    #[must_use]
    pub fn form(&self) -> Option<&Form> {
        match self {
            Modal::AddBuilding(form)
            | Modal::AddFloor { form, .. }
            | Modal::AddCompany { form, .. }
            | Modal::AddInvoice { form, .. }
            | Modal::AddBill { form, .. } => Some(form),
            Modal::ConfirmDelete { .. } => None,
        }
    }

    fn form_mut(&mut self) -> Option<&mut Form> {
        match self {
            Modal::AddBuilding(form)
            | Modal::AddFloor { form, .. }
            | Modal::AddCompany { form, .. }
            | Modal::AddInvoice { form, .. }
            | Modal::AddBill { form, .. } => Some(form),
            Modal::ConfirmDelete { .. } => None,
        }
    }
}

pub struct App {
    pub store: SiteStore,
    pub view: View,
    pub focus: Focus,
    pub selected_building: usize,
    pub selected_floor: usize,
    pub selected_company: usize,
    pub selected_invoice: usize,
    pub expanded_companies: HashSet<u64>,
    pub expanded_invoices: HashSet<u64>,
    pub modal: Option<Modal>,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(store: SiteStore) -> Self {
        Self {
            store,
            view: View::Buildings,
            focus: Focus::Companies,
            selected_building: 0,
            selected_floor: 0,
            selected_company: 0,
            selected_invoice: 0,
            expanded_companies: HashSet::new(),
            expanded_invoices: HashSet::new(),
            modal: None,
            should_quit: false,
        }
    }

    /// Runs the event loop until quit, then hands the store back so the
    /// caller can export the final state.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<SiteStore> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(self.store)
    }

    fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Buildings => super::dashboard::draw_buildings(frame, self),
            View::Floors { .. } => super::dashboard::draw_floors(frame, self),
            View::Companies { .. } => super::dashboard::draw_companies(frame, self),
        }
        if let Some(modal) = &self.modal {
            super::dashboard::draw_modal(frame, modal);
        }
    }

    fn handle_events(&mut self) -> Result<()> {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            if self.modal.is_some() {
                self.handle_modal_keys(key.code);
                return Ok(());
            }

            match self.view {
                View::Buildings => self.handle_buildings_keys(key.code),
                View::Floors { .. } => self.handle_floors_keys(key.code),
                View::Companies { .. } => self.handle_companies_keys(key.code),
            }
        }
        Ok(())
    }

    // ---- buildings screen ----

    fn handle_buildings_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.previous_building(),
            KeyCode::Down | KeyCode::Char('j') => self.next_building(),
            KeyCode::Enter => self.open_floors(),
            KeyCode::Char('a') => {
                self.modal = Some(Modal::AddBuilding(Form::new(
                    "Add New Building",
                    &["Building name"],
                )));
            }
            KeyCode::Char('d') => self.confirm_delete_building(),
            _ => {}
        }
    }

    fn previous_building(&mut self) {
        if self.selected_building > 0 {
            self.selected_building -= 1;
        }
    }

    fn next_building(&mut self) {
        if self.selected_building < self.store.buildings().len().saturating_sub(1) {
            self.selected_building += 1;
        }
    }

    fn open_floors(&mut self) {
        if let Some(building) = self.get_selected_building() {
            self.view = View::Floors {
                building_id: building.id,
            };
            self.selected_floor = 0;
        }
    }

    fn confirm_delete_building(&mut self) {
        if let Some(building) = self.get_selected_building() {
            self.modal = Some(Modal::ConfirmDelete {
                building_id: building.id,
                name: building.name.clone(),
            });
        }
    }

    // ---- floors screen ----

    fn handle_floors_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace => self.view = View::Buildings,
            KeyCode::Up | KeyCode::Char('k') => self.previous_floor(),
            KeyCode::Down | KeyCode::Char('j') => self.next_floor(),
            KeyCode::Enter => self.open_companies(),
            KeyCode::Char('a') => {
                if let View::Floors { building_id } = self.view {
                    self.modal = Some(Modal::AddFloor {
                        building_id,
                        form: Form::new("Add Floor", &["Floor name"]),
                    });
                }
            }
            _ => {}
        }
    }

    fn previous_floor(&mut self) {
        if self.selected_floor > 0 {
            self.selected_floor -= 1;
        }
    }

    fn next_floor(&mut self) {
        let count = self.viewed_building().map_or(0, |b| b.floors.len());
        if self.selected_floor < count.saturating_sub(1) {
            self.selected_floor += 1;
        }
    }

    fn open_companies(&mut self) {
        let target = self.viewed_building().and_then(|building| {
            building
                .floors
                .get(self.selected_floor)
                .map(|floor| (building.id, floor.id))
        });
        if let Some((building_id, floor_id)) = target {
            self.view = View::Companies {
                building_id,
                floor_id,
            };
            self.focus = Focus::Companies;
            self.selected_company = 0;
            self.selected_invoice = 0;
            // Expansion state is per view instance.
            self.expanded_companies.clear();
            self.expanded_invoices.clear();
        }
    }

    // ---- companies screen ----

    fn handle_companies_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace => self.close_companies(),
            KeyCode::Left | KeyCode::Char('h') => self.focus = Focus::Companies,
            KeyCode::Right | KeyCode::Char('l') => self.focus_invoices(),
            KeyCode::Up | KeyCode::Char('k') => self.navigate_up(),
            KeyCode::Down | KeyCode::Char('j') => self.navigate_down(),
            KeyCode::Enter => self.toggle_expanded(),
            KeyCode::Char('a') => {
                if let View::Companies { floor_id, .. } = self.view {
                    self.modal = Some(Modal::AddCompany {
                        floor_id,
                        form: Form::new(
                            "Add New Company",
                            &[
                                "Company name",
                                "PO number",
                                "PO value",
                                "PO date (optional)",
                            ],
                        ),
                    });
                }
            }
            KeyCode::Char('i') => self.open_invoice_form(),
            KeyCode::Char('b') => self.open_bill_form(),
            _ => {}
        }
    }

    fn close_companies(&mut self) {
        if let View::Companies { building_id, .. } = self.view {
            self.view = View::Floors { building_id };
        }
    }

    fn focus_invoices(&mut self) {
        let target = self
            .get_selected_company()
            .filter(|c| !c.invoices.is_empty())
            .map(|c| c.id);
        if let Some(company_id) = target {
            self.focus = Focus::Invoices;
            self.expanded_companies.insert(company_id);
            let count = self.get_selected_company().map_or(0, |c| c.invoices.len());
            if self.selected_invoice >= count {
                self.selected_invoice = 0;
            }
        }
    }

    fn navigate_up(&mut self) {
        match self.focus {
            Focus::Companies => {
                if self.selected_company > 0 {
                    self.selected_company -= 1;
                    self.selected_invoice = 0;
                }
            }
            Focus::Invoices => {
                if self.selected_invoice > 0 {
                    self.selected_invoice -= 1;
                }
            }
        }
    }

    fn navigate_down(&mut self) {
        match self.focus {
            Focus::Companies => {
                let count = self.viewed_floor().map_or(0, |f| f.companies.len());
                if self.selected_company < count.saturating_sub(1) {
                    self.selected_company += 1;
                    self.selected_invoice = 0;
                }
            }
            Focus::Invoices => {
                let count = self.get_selected_company().map_or(0, |c| c.invoices.len());
                if self.selected_invoice < count.saturating_sub(1) {
                    self.selected_invoice += 1;
                }
            }
        }
    }

    fn toggle_expanded(&mut self) {
        match self.focus {
            Focus::Companies => {
                if let Some(company) = self.get_selected_company() {
                    let id = company.id;
                    toggle(&mut self.expanded_companies, id);
                }
            }
            Focus::Invoices => {
                if let Some(invoice) = self.get_selected_invoice() {
                    let id = invoice.id;
                    toggle(&mut self.expanded_invoices, id);
                }
            }
        }
    }

    fn open_invoice_form(&mut self) {
        if let Some(company) = self.get_selected_company() {
            let company_id = company.id;
            self.expanded_companies.insert(company_id);
            self.modal = Some(Modal::AddInvoice {
                company_id,
                form: Form::new("Add New Invoice", &["Invoice value", "File (optional)"]),
            });
        }
    }

    fn open_bill_form(&mut self) {
        if self.focus != Focus::Invoices {
            return;
        }
        if let Some(invoice) = self.get_selected_invoice() {
            let invoice_id = invoice.id;
            self.expanded_invoices.insert(invoice_id);
            self.modal = Some(Modal::AddBill {
                invoice_id,
                form: Form::new("Add New Bill", &["Bill value", "File (optional)"]),
            });
        }
    }

    // ---- modal handling ----

    fn handle_modal_keys(&mut self, code: KeyCode) {
        let Some(mut modal) = self.modal.take() else {
            return;
        };

        if let Modal::ConfirmDelete { building_id, .. } = &modal {
            match code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    // A lookup miss degrades to a no-op.
                    self.store.delete_building(*building_id).ok();
                    self.clamp_building_selection();
                    return;
                }
                KeyCode::Char('n') | KeyCode::Esc => return,
                _ => {}
            }
            self.modal = Some(modal);
            return;
        }

        match code {
            KeyCode::Esc => return,
            KeyCode::Enter => {
                if self.submit(&mut modal) {
                    return;
                }
            }
            other => {
                if let Some(form) = modal.form_mut() {
                    form.handle_key(other);
                }
            }
        }
        self.modal = Some(modal);
    }

    /// Applies the form to the store. Returns true when the modal should
    /// close; on a rejected submit the error stays on the form.
    fn submit(&mut self, modal: &mut Modal) -> bool {
        let result = match modal {
            Modal::AddBuilding(form) => self
                .store
                .add_building(form.value(0))
                .map_err(|e| e.to_string()),
            Modal::AddFloor { building_id, form } => self
                .store
                .add_floor(*building_id, form.value(0))
                .map_err(|e| e.to_string()),
            Modal::AddCompany { floor_id, form } => match form.amount(2) {
                Some(po_value) => self
                    .store
                    .add_company(
                        *floor_id,
                        form.value(0),
                        form.value(1),
                        po_value,
                        form.optional(3),
                    )
                    .map_err(|e| e.to_string()),
                None => Err(String::from("enter a valid PO value")),
            },
            Modal::AddInvoice { company_id, form } => match form.amount(0) {
                Some(value) => self
                    .store
                    .add_invoice(*company_id, value, form.file_ref(1))
                    .map_err(|e| e.to_string()),
                None => Err(String::from("enter a valid invoice value")),
            },
            Modal::AddBill { invoice_id, form } => match form.amount(0) {
                Some(value) => self
                    .store
                    .add_bill(*invoice_id, value, form.file_ref(1))
                    .map_err(|e| e.to_string()),
                None => Err(String::from("enter a valid bill value")),
            },
            Modal::ConfirmDelete { .. } => return true,
        };

        match result {
            Ok(_) => true,
            Err(message) => {
                if let Some(form) = modal.form_mut() {
                    form.error = Some(message);
                }
                false
            }
        }
    }

    fn clamp_building_selection(&mut self) {
        let len = self.store.buildings().len();
        if self.selected_building >= len {
            self.selected_building = len.saturating_sub(1);
        }
    }

    // ---- resolvers ----
    //
    // Ids are re-resolved every frame; a miss renders as "not found"
    // instead of panicking.

    #[must_use]
    pub fn get_selected_building(&self) -> Option<&Building> {
        self.store.buildings().get(self.selected_building)
    }

    /// The building the current view is addressed to (floors/companies).
    #[must_use]
    pub fn viewed_building(&self) -> Option<&Building> {
        match self.view {
            View::Buildings => None,
            View::Floors { building_id } | View::Companies { building_id, .. } => {
                self.store.building(building_id)
            }
        }
    }

    /// The floor the companies view is addressed to.
    #[must_use]
    pub fn viewed_floor(&self) -> Option<&Floor> {
        match self.view {
            View::Companies { floor_id, .. } => self.store.floor(floor_id),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_selected_floor(&self) -> Option<&Floor> {
        self.viewed_building()?.floors.get(self.selected_floor)
    }

    #[must_use]
    pub fn get_selected_company(&self) -> Option<&Company> {
        self.viewed_floor()?.companies.get(self.selected_company)
    }

    #[must_use]
    pub fn get_selected_invoice(&self) -> Option<&Invoice> {
        self.get_selected_company()?
            .invoices
            .get(self.selected_invoice)
    }
}

fn toggle(set: &mut HashSet<u64>, id: u64) {
    if !set.insert(id) {
        set.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_app() -> App {
        App::new(SiteStore::sample().unwrap())
    }

    fn enter_companies(app: &mut App) {
        app.handle_buildings_keys(KeyCode::Enter);
        app.handle_floors_keys(KeyCode::Enter);
    }

    #[test]
    fn enter_descends_through_the_views() {
        let mut app = sample_app();
        assert_eq!(app.view, View::Buildings);

        app.handle_buildings_keys(KeyCode::Enter);
        assert!(matches!(app.view, View::Floors { .. }));

        app.handle_floors_keys(KeyCode::Enter);
        assert!(matches!(app.view, View::Companies { .. }));
        assert_eq!(app.viewed_floor().unwrap().name, "Ground Floor");

        app.handle_companies_keys(KeyCode::Esc);
        assert!(matches!(app.view, View::Floors { .. }));
    }

    #[test]
    fn toggling_expansion_flips_set_membership() {
        let mut app = sample_app();
        enter_companies(&mut app);

        let company_id = app.get_selected_company().unwrap().id;
        app.handle_companies_keys(KeyCode::Enter);
        assert!(app.expanded_companies.contains(&company_id));
        app.handle_companies_keys(KeyCode::Enter);
        assert!(!app.expanded_companies.contains(&company_id));
    }

    #[test]
    fn focus_moves_right_only_when_invoices_exist() {
        let mut app = sample_app();
        enter_companies(&mut app);

        app.handle_companies_keys(KeyCode::Right);
        assert_eq!(app.focus, Focus::Invoices);

        // First Floor's company has no invoices, so focus stays put.
        app.handle_companies_keys(KeyCode::Esc);
        app.handle_floors_keys(KeyCode::Down);
        app.handle_floors_keys(KeyCode::Enter);
        app.handle_companies_keys(KeyCode::Right);
        assert_eq!(app.focus, Focus::Companies);
    }

    #[test]
    fn rejected_submit_keeps_the_modal_open() {
        let mut app = sample_app();
        app.handle_buildings_keys(KeyCode::Char('a'));
        assert!(app.modal.is_some());

        app.handle_modal_keys(KeyCode::Enter);
        let Some(Modal::AddBuilding(form)) = &app.modal else {
            panic!("modal should stay open after a blank submit");
        };
        assert!(form.error.is_some());
        assert_eq!(app.store.buildings().len(), 1);
    }

    #[test]
    fn valid_submit_appends_and_closes() {
        let mut app = sample_app();
        app.handle_buildings_keys(KeyCode::Char('a'));
        for c in "Tower B".chars() {
            app.handle_modal_keys(KeyCode::Char(c));
        }
        app.handle_modal_keys(KeyCode::Enter);

        assert!(app.modal.is_none());
        assert_eq!(app.store.buildings().len(), 2);
        assert_eq!(app.store.buildings()[1].name, "Tower B");
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = sample_app();
        app.handle_buildings_keys(KeyCode::Char('d'));
        assert!(matches!(app.modal, Some(Modal::ConfirmDelete { .. })));

        app.handle_modal_keys(KeyCode::Char('n'));
        assert_eq!(app.store.buildings().len(), 1);

        app.handle_buildings_keys(KeyCode::Char('d'));
        app.handle_modal_keys(KeyCode::Char('y'));
        assert_eq!(app.store.buildings().len(), 0);
        assert!(app.modal.is_none());
    }

    #[test]
    fn dangling_view_ids_resolve_to_none() {
        let mut app = sample_app();
        let building_id = app.store.buildings()[0].id;
        app.handle_buildings_keys(KeyCode::Enter);

        app.store.delete_building(building_id).unwrap();
        assert!(app.viewed_building().is_none());
        // Navigation on a missing building is a no-op, not a panic.
        app.handle_floors_keys(KeyCode::Down);
        app.handle_floors_keys(KeyCode::Enter);
        assert!(matches!(app.view, View::Floors { .. }));
    }
}
