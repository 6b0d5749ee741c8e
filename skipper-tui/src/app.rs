use skipper_core::{
    model::{Location, Skip, SkipId},
    ports::PortError,
};

/// Tag handed out with every fetch so late results can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FetchTicket(u64);

/// Which of the mutually exclusive top-level panels is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum View {
    Loading,
    Failed,
    Ready,
}

/// State of the skip selector. Every user interaction goes through one of the
/// transition methods below; drawing only ever reads it.
pub(crate) struct App {
    pub location: Location,

    pub skips: Vec<Skip>,
    pub selected: Option<SkipId>,
    pub cursor: usize,

    pub is_loading: bool,
    pub error_message: Option<String>,
    pub show_checkout_modal: bool,
    pub status_message: Option<String>,

    pub tick: usize,

    mounted: bool,
    generation: u64,
}

impl App {
    pub(crate) fn new(location: Location) -> Self {
        Self {
            location,
            skips: Vec::new(),
            selected: None,
            cursor: 0,
            is_loading: false,
            error_message: None,
            show_checkout_modal: false,
            status_message: None,
            tick: 0,
            mounted: false,
            generation: 0,
        }
    }

    pub(crate) fn view(&self) -> View {
        if self.is_loading {
            View::Loading
        } else if self.error_message.is_some() {
            View::Failed
        } else {
            View::Ready
        }
    }

    /// Activate the view. Only the first call per lifecycle asks for a fetch.
    pub(crate) fn mount(&mut self) -> Option<FetchTicket> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        Some(self.start_fetch())
    }

    /// Invalidate any fetch still in flight; its result will be dropped.
    pub(crate) fn unmount(&mut self) {
        self.generation += 1;
        self.mounted = false;
        self.is_loading = false;
    }

    /// Throw away all view state and mount again, as a full page reload would.
    pub(crate) fn reload(&mut self) -> FetchTicket {
        tracing::info!(location = %self.location, "reloading skip selector");
        let location = self.location.clone();
        let generation = self.generation + 1;
        *self = Self::new(location);
        self.generation = generation;
        self.mounted = true;
        self.start_fetch()
    }

    fn start_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.is_loading = true;
        FetchTicket(self.generation)
    }

    /// Apply the outcome of a fetch. Returns `false` when the result was stale.
    pub(crate) fn finish_loading(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Skip>, PortError>,
    ) -> bool {
        if ticket != FetchTicket(self.generation) || !self.mounted {
            tracing::debug!(?ticket, "discarding stale skip fetch");
            return false;
        }

        match result {
            Ok(skips) => {
                self.skips = skips;
                self.error_message = None;
            }
            Err(err) => {
                tracing::error!(error = %err, "error loading skips");
                self.skips.clear();
                self.error_message = Some(err.to_string());
            }
        }
        self.is_loading = false;
        self.cursor = 0;
        true
    }

    pub(crate) fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub(crate) fn selected_skip(&self) -> Option<&Skip> {
        let id = self.selected.as_ref()?;
        self.skips.iter().find(|skip| &skip.id == id)
    }

    pub(crate) fn is_selected(&self, skip: &Skip) -> bool {
        self.selected.as_ref() == Some(&skip.id)
    }

    /// Select `id`, or clear the selection when it is already selected.
    pub(crate) fn toggle_selection(&mut self, id: &SkipId) {
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        } else if self.skips.iter().any(|skip| &skip.id == id) {
            self.selected = Some(id.clone());
        }
    }

    pub(crate) fn toggle_focused(&mut self) {
        if let Some(id) = self.skips.get(self.cursor).map(|skip| skip.id.clone()) {
            self.toggle_selection(&id);
        }
    }

    pub(crate) fn focus(&mut self, index: usize) {
        if index < self.skips.len() {
            self.cursor = index;
        }
    }

    /// Move focus by `delta` cards, staying on the current card at the edges.
    pub(crate) fn move_focus(&mut self, delta: isize) {
        if let Some(index) = self.cursor.checked_add_signed(delta) {
            self.focus(index);
        }
    }

    /// Open the confirmation modal. Does nothing without a selection.
    pub(crate) fn continue_to_checkout(&mut self) -> bool {
        if self.selected_skip().is_some() {
            self.show_checkout_modal = true;
        }
        self.show_checkout_modal
    }

    pub(crate) fn close_modal(&mut self) {
        self.show_checkout_modal = false;
    }

    /// The skip to pass on to checkout. The modal stays open until
    /// [`App::finish_checkout`] reports back.
    pub(crate) fn proceed_to_checkout(&self) -> Option<Skip> {
        if !self.modal_is_open() {
            return None;
        }
        self.selected_skip().cloned()
    }

    /// Close the modal once checkout has been invoked and show its outcome.
    pub(crate) fn finish_checkout(&mut self, skip: &Skip, result: Result<(), PortError>) {
        self.show_checkout_modal = false;
        self.status_message = Some(match result {
            Ok(()) => format!("{} Yard Skip handed over to checkout", skip.size),
            Err(err) => {
                tracing::error!(error = %err, skip_id = %skip.id, "checkout failed");
                err.to_string()
            }
        });
    }

    pub(crate) fn change_selection(&mut self) {
        self.selected = None;
        self.show_checkout_modal = false;
    }

    pub(crate) fn modal_is_open(&self) -> bool {
        self.show_checkout_modal && self.selected.is_some()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn skip(id: i64, size: u32) -> Skip {
        Skip {
            id: SkipId::Number(id),
            size,
            area: "Lowestoft".to_owned(),
            postcode: "NR32".to_owned(),
            price_before_vat: 300.0,
            vat: 20.0,
            hire_period_days: 14,
            allowed_on_road: true,
            allows_heavy_waste: false,
        }
    }

    pub(crate) fn ready_app(skips: Vec<Skip>) -> App {
        let mut app = App::new(Location::default());
        let ticket = app.mount().expect("first mount fetches");
        assert!(app.finish_loading(ticket, Ok(skips)), "fresh ticket applies");
        app
    }

    #[test]
    fn mount_fetches_exactly_once() {
        let mut app = App::new(Location::default());

        assert!(app.mount().is_some(), "first mount fetches");
        assert!(app.is_loading, "loading while the fetch runs");
        assert_eq!(app.view(), View::Loading, "only the spinner is shown");
        assert!(app.mount().is_none(), "second mount must not fetch again");
    }

    #[test]
    fn successful_fetch_populates_list_in_order() {
        let app = ready_app(vec![skip(3, 8), skip(1, 4)]);

        assert!(!app.is_loading, "loading cleared");
        assert_eq!(app.error_message, None, "no error");
        assert_eq!(app.view(), View::Ready, "grid is shown");
        let ids: Vec<&SkipId> = app.skips.iter().map(|skip| &skip.id).collect();
        assert_eq!(ids, vec![&SkipId::Number(3), &SkipId::Number(1)], "server order");
    }

    #[test]
    fn failed_fetch_shows_error_and_no_cards() {
        let mut app = App::new(Location::default());
        let ticket = app.mount().expect("first mount fetches");

        let error = PortError::Server {
            status: 500,
            status_text: "Internal Server Error".to_owned(),
        };
        assert!(app.finish_loading(ticket, Err(error)), "fresh ticket applies");

        assert!(!app.is_loading, "loading cleared");
        assert_eq!(app.view(), View::Failed, "error panel is shown");
        assert_eq!(
            app.error_message.as_deref(),
            Some("API Error: 500 - Internal Server Error"),
            "client message is surfaced"
        );
        assert!(app.skips.is_empty(), "no partial list");
    }

    #[test]
    fn reload_resets_everything_and_fetches_again() {
        let mut app = ready_app(vec![skip(1, 4)]);
        app.toggle_selection(&SkipId::Number(1));
        app.continue_to_checkout();

        let ticket = app.reload();

        assert!(app.is_loading, "reload shows the spinner again");
        assert!(app.skips.is_empty(), "list cleared");
        assert_eq!(app.selected, None, "selection cleared");
        assert!(!app.show_checkout_modal, "modal closed");
        assert!(app.mount().is_none(), "reload already counts as the mount");
        assert!(app.finish_loading(ticket, Ok(vec![skip(2, 6)])), "fresh ticket applies");
        assert_eq!(app.skips.len(), 1, "new list shown");
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut app = App::new(Location::default());
        let first = app.mount().expect("first mount fetches");
        let second = app.reload();

        assert!(!app.finish_loading(first, Ok(vec![skip(1, 4)])), "old ticket is stale");
        assert!(app.is_loading, "still waiting for the current fetch");
        assert!(app.finish_loading(second, Ok(vec![skip(2, 6)])), "current ticket applies");
        assert_eq!(app.skips.first().map(|skip| skip.size), Some(6), "second result wins");
    }

    #[test]
    fn results_after_unmount_are_ignored() {
        let mut app = App::new(Location::default());
        let ticket = app.mount().expect("first mount fetches");
        app.unmount();

        assert!(!app.finish_loading(ticket, Ok(vec![skip(1, 4)])), "unmounted view");
        assert!(app.skips.is_empty(), "state untouched");
    }

    #[test]
    fn selecting_twice_clears_selection() {
        let mut app = ready_app(vec![skip(1, 4), skip(2, 6)]);

        app.toggle_selection(&SkipId::Number(1));
        assert_eq!(app.selected, Some(SkipId::Number(1)), "selected");
        app.toggle_selection(&SkipId::Number(1));
        assert_eq!(app.selected, None, "toggled off");
    }

    #[test]
    fn selecting_another_card_replaces_selection() {
        let mut app = ready_app(vec![skip(1, 4), skip(2, 6)]);

        app.toggle_selection(&SkipId::Number(1));
        app.toggle_selection(&SkipId::Number(2));

        assert_eq!(app.selected, Some(SkipId::Number(2)), "only B is selected");
        let selected: Vec<&Skip> = app.skips.iter().filter(|skip| app.is_selected(skip)).collect();
        assert_eq!(selected.len(), 1, "at most one selection");
    }

    #[test]
    fn unknown_ids_are_not_selectable() {
        let mut app = ready_app(vec![skip(1, 4)]);
        app.toggle_selection(&SkipId::Number(99));
        assert_eq!(app.selected, None, "nothing selected");
    }

    #[test]
    fn continue_without_selection_keeps_modal_closed() {
        let mut app = ready_app(vec![skip(1, 4)]);

        assert!(!app.continue_to_checkout(), "no selection, no modal");
        assert!(!app.modal_is_open(), "modal closed");
    }

    #[test]
    fn closing_modal_keeps_selection() {
        let mut app = ready_app(vec![skip(1, 4)]);
        app.toggle_selection(&SkipId::Number(1));

        assert!(app.continue_to_checkout(), "modal opens");
        app.close_modal();

        assert!(!app.modal_is_open(), "modal closed");
        assert_eq!(app.selected, Some(SkipId::Number(1)), "selection preserved");
    }

    #[test]
    fn proceeding_hands_over_selection_and_closes_after_checkout() {
        let mut app = ready_app(vec![skip(1, 4), skip(2, 6)]);
        app.toggle_selection(&SkipId::Number(2));
        app.continue_to_checkout();

        let handed_over = app.proceed_to_checkout().expect("modal is open");

        assert_eq!(handed_over.size, 6, "selected skip");
        assert!(app.modal_is_open(), "modal stays open while checkout runs");

        app.finish_checkout(&handed_over, Ok(()));

        assert!(!app.modal_is_open(), "modal closed after checkout");
        assert_eq!(
            app.status_message.as_deref(),
            Some("6 Yard Skip handed over to checkout"),
            "outcome shown"
        );
        assert!(app.proceed_to_checkout().is_none(), "nothing to proceed without modal");
    }

    #[test]
    fn failed_checkout_closes_modal_and_keeps_selection() {
        let mut app = ready_app(vec![skip(1, 4)]);
        app.toggle_selection(&SkipId::Number(1));
        app.continue_to_checkout();
        let handed_over = app.proceed_to_checkout().expect("modal is open");

        app.finish_checkout(
            &handed_over,
            Err(PortError::Checkout("card declined".to_owned())),
        );

        assert!(!app.modal_is_open(), "modal closed");
        assert_eq!(app.selected, Some(SkipId::Number(1)), "selection kept");
        assert_eq!(
            app.status_message.as_deref(),
            Some("Checkout Error: card declined"),
            "error shown in the status bar"
        );
    }

    #[test]
    fn change_selection_clears_only_the_selection() {
        let mut app = ready_app(vec![skip(1, 4), skip(2, 6)]);
        app.toggle_selection(&SkipId::Number(1));

        app.change_selection();

        assert_eq!(app.selected, None, "selection cleared");
        assert!(!app.modal_is_open(), "modal closed");
        assert_eq!(app.skips.len(), 2, "list unchanged");
    }

    #[test]
    fn focus_stays_within_list() {
        let mut app = ready_app(vec![skip(1, 4), skip(2, 6), skip(3, 8)]);

        app.move_focus(-1);
        assert_eq!(app.cursor, 0, "cannot move before the first card");
        app.move_focus(2);
        assert_eq!(app.cursor, 2, "moved to last card");
        app.move_focus(1);
        assert_eq!(app.cursor, 2, "cannot move past the last card");

        app.toggle_focused();
        assert_eq!(app.selected, Some(SkipId::Number(3)), "focused card selected");
    }
}
