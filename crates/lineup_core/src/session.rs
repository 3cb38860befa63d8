//! Lineup builder session
//!
//! Owns the inputs a pitch widget reacts to (roster, scheme, selection) and
//! re-emits the selection to subscribers after every change.

use crate::config::LineupConfig;
use crate::error::Result;
use crate::lineup::{build_layout, PitchLayout};
use crate::models::{merge_players, Player};
use crate::recommend::{recommend, suggest_captaincy, Recommendation};
use crate::selection::{SelectionAction, SelectionState};
use crate::tactics::FormationScheme;
use std::fmt;
use tracing::{debug, info};

type Listener = Box<dyn FnMut(&SelectionState)>;

pub struct LineupSession {
    players: Vec<Player>,
    scheme: FormationScheme,
    selection: SelectionState,
    config: LineupConfig,
    listeners: Vec<Listener>,
}

impl fmt::Debug for LineupSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineupSession")
            .field("players", &self.players.len())
            .field("scheme", &self.scheme)
            .field("selection", &self.selection)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl LineupSession {
    pub fn new(players: Vec<Player>, scheme: FormationScheme, config: LineupConfig) -> Self {
        Self {
            players,
            scheme,
            selection: SelectionState::new(),
            config,
            listeners: Vec::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn scheme(&self) -> FormationScheme {
        self.scheme
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn config(&self) -> &LineupConfig {
        &self.config
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Register a listener called with the selection after every change.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&SelectionState) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener(&self.selection);
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn apply(&mut self, action: &SelectionAction) -> &SelectionState {
        debug!(action = action.name(), "session apply");
        self.selection = self.selection.apply(action);
        self.emit();
        &self.selection
    }

    /// Full-state replace from an external update (persistence, remote peer).
    pub fn replace_selection(&mut self, selection: SelectionState) {
        self.selection = selection;
        self.emit();
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    pub fn set_players(&mut self, players: Vec<Player>) {
        self.players = players;
    }

    /// Upsert by id; existing players keep their roster position.
    pub fn merge_players(&mut self, incoming: &[Player]) {
        self.players = merge_players(&self.players, incoming);
        debug!(players = self.players.len(), "roster merged");
    }

    pub fn set_scheme(&mut self, scheme: FormationScheme) {
        if scheme != self.scheme {
            info!(from = %self.scheme, to = %scheme, "formation changed");
        }
        self.scheme = scheme;
    }

    /// Parse and set a scheme code such as "4-3-3".
    pub fn set_scheme_code(&mut self, code: &str) -> Result<()> {
        self.set_scheme(code.parse()?);
        Ok(())
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// Pitch layout for the current inputs: the eleven when one is picked,
    /// otherwise the whole roster.
    pub fn layout(&self) -> PitchLayout<'_> {
        let on_pitch: Vec<&Player> = if self.selection.starting_eleven().is_empty() {
            self.players.iter().collect()
        } else {
            self.selection.starters(&self.players)
        };
        build_layout(on_pitch, self.scheme, self.config.orientation, &self.config.resolver)
    }

    pub fn recommendation(&self) -> Recommendation {
        recommend(&self.players, self.scheme, &self.selection, &self.config.recommender)
    }

    /// Replace the eleven with the recommendation, then emit.
    pub fn apply_recommendation(&mut self) -> Recommendation {
        let rec = self.recommendation();
        self.selection = rec.apply_to(&self.selection);
        self.emit();
        rec
    }

    /// Pick captain and vice from the current eleven, then emit.
    pub fn apply_captaincy_suggestion(&mut self) {
        let starters = self.selection.starters(&self.players);
        let (captain, vice) = suggest_captaincy(&starters, self.config.recommender.risk_level);
        self.selection = self.selection.with_leadership(captain.as_ref(), vice.as_ref());
        self.emit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerId, PositionGroup};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn squad() -> Vec<Player> {
        use PositionGroup::*;
        let groups = [
            ("gk", Goalkeeper, 1),
            ("d", Defender, 4),
            ("m", Midfielder, 3),
            ("f", Forward, 3),
        ];
        groups
            .iter()
            .flat_map(|(prefix, group, n)| {
                (1..=*n).map(move |i| {
                    Player::new(format!("{prefix}{i}"), format!("{prefix} {i}"), *group)
                        .with_projection(3.0, 7.0, 0.9)
                })
            })
            .collect()
    }

    fn recorded(session: &mut LineupSession) -> Rc<RefCell<Vec<SelectionState>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        session.subscribe(move |s| sink.borrow_mut().push(s.clone()));
        log
    }

    #[test]
    fn test_apply_emits_every_transition() {
        let mut session = LineupSession::new(squad(), FormationScheme::F433, LineupConfig::default());
        let log = recorded(&mut session);

        session.apply(&SelectionAction::AddToXi(PlayerId::from("f1")));
        session.apply(&SelectionAction::SetCaptain(PlayerId::from("f1")));

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert!(log[1].is_captain("f1"));
        assert_eq!(&log[1], session.selection());
    }

    #[test]
    fn test_replace_selection_is_emitted() {
        let mut session = LineupSession::new(squad(), FormationScheme::F433, LineupConfig::default());
        let log = recorded(&mut session);
        let external = SelectionState::new().toggle_lock("d1");
        session.replace_selection(external.clone());
        assert_eq!(log.borrow().as_slice(), &[external]);
    }

    #[test]
    fn test_layout_uses_roster_until_eleven_is_picked() {
        let mut session = LineupSession::new(squad(), FormationScheme::F433, LineupConfig::default());
        assert_eq!(session.layout().occupied().count(), 11);

        session.apply(&SelectionAction::AddToXi(PlayerId::from("gk1")));
        let layout = session.layout();
        assert_eq!(layout.occupied().count(), 1);
        assert_eq!(layout.placeholders().count(), 10);
        assert!(layout.spot_of("gk1").is_some());
    }

    #[test]
    fn test_set_scheme_changes_layout() {
        let mut session = LineupSession::new(squad(), FormationScheme::F433, LineupConfig::default());
        session.set_scheme_code("3-5-2").unwrap();
        assert_eq!(session.scheme(), FormationScheme::F352);
        let layout = session.layout();
        // 4 defenders for 3 slots, 3 midfielders for 5 slots
        assert_eq!(layout.overflow.len(), 2);
        assert_eq!(layout.placeholders().count(), 2);

        assert!(session.set_scheme_code("9-9-9").is_err());
        assert_eq!(session.scheme(), FormationScheme::F352);
    }

    #[test]
    fn test_merge_players_keeps_order() {
        let mut session = LineupSession::new(squad(), FormationScheme::F433, LineupConfig::default());
        let renamed = Player::new("d2", "Renamed", PositionGroup::Defender);
        let newcomer = Player::new("f9", "New", PositionGroup::Forward);
        session.merge_players(&[renamed, newcomer]);
        assert_eq!(session.players().len(), 12);
        assert_eq!(session.players()[2].name, "Renamed");
        assert_eq!(session.players()[11].id.as_str(), "f9");
    }

    #[test]
    fn test_recommendation_and_captaincy() {
        let mut session = LineupSession::new(squad(), FormationScheme::F433, LineupConfig::default());
        let log = recorded(&mut session);

        let rec = session.apply_recommendation();
        assert_eq!(rec.starting_eleven.len(), 11);
        assert_eq!(session.selection().starting_eleven().len(), 11);

        session.apply_captaincy_suggestion();
        let selection = session.selection();
        let captain = selection.captain().cloned().unwrap();
        let vice = selection.vice_captain().cloned().unwrap();
        assert_ne!(captain, vice);
        assert!(selection.is_in_xi(captain.as_str()));
        assert!(selection.is_consistent());
        // equal projections: forwards carry the highest role weight
        assert_eq!(captain.as_str(), "f1");
        assert_eq!(vice.as_str(), "f2");
        assert_eq!(log.borrow().len(), 2);
    }
}
