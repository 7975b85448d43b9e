use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use std::collections::HashMap;
use tui_textarea::TextArea;

use crate::api::ApiError;
use crate::calendar::CalendarState;
use crate::config::AppConfig;
use crate::input::{self, Route};
use crate::locale::Strings;
use crate::model::{parse_task_lines, NewNote, Note, NoteColor, Profile, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Wall,
    Calendar,
    Profile,
}

impl View {
    pub const ALL: [View; 3] = [View::Wall, View::Calendar, View::Profile];

    pub fn label(self, strings: &Strings) -> &'static str {
        match self {
            View::Wall => strings.nav_wall,
            View::Calendar => strings.nav_calendar,
            View::Profile => strings.nav_profile,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    Active,
    Inactive,
}

/// Exactly one view is visible; the active link follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSwitcher {
    active: View,
}

impl Default for ViewSwitcher {
    fn default() -> Self {
        Self { active: View::Wall }
    }
}

impl ViewSwitcher {
    pub fn switch_view(&mut self, target: View) {
        self.active = target;
    }

    pub fn active(&self) -> View {
        self.active
    }

    pub fn is_visible(&self, view: View) -> bool {
        self.active == view
    }

    pub fn link_style(&self, view: View) -> LinkStyle {
        if self.is_visible(view) {
            LinkStyle::Active
        } else {
            LinkStyle::Inactive
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WallCard<'n> {
    Note(&'n Note),
    EmptyState,
    AddNote,
}

/// Notes as last confirmed by the service, plus the card/task cursor.
#[derive(Debug, Default)]
pub struct WallState {
    notes: Vec<Note>,
    selected: usize,
    task_cursor: Option<usize>,
    /// Latest requested state per task with a toggle still in flight.
    toggles: HashMap<RecordId, (bool, usize)>,
}

impl WallState {
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn cards(&self) -> Vec<WallCard<'_>> {
        let mut cards: Vec<WallCard<'_>> = if self.notes.is_empty() {
            vec![WallCard::EmptyState]
        } else {
            self.notes.iter().map(WallCard::Note).collect()
        };
        cards.push(WallCard::AddNote);
        cards
    }

    pub fn replace(&mut self, notes: Vec<Note>) {
        self.notes = notes;
        self.selected = self.selected.min(self.notes.len());
        self.clamp_task_cursor();
    }

    /// Index into `notes`, or `notes.len()` for the add card.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.notes.get(self.selected)
    }

    pub fn task_cursor(&self) -> Option<usize> {
        self.task_cursor
    }

    pub fn add_card_selected(&self) -> bool {
        self.selected == self.notes.len()
    }

    pub fn move_card(&mut self, delta: i32) {
        let last = self.notes.len() as i32;
        self.selected = (self.selected as i32 + delta).clamp(0, last) as usize;
        self.task_cursor = None;
        self.clamp_task_cursor();
    }

    pub fn move_task(&mut self, delta: i32) {
        let Some(note) = self.selected_note() else {
            return;
        };
        if note.tasks.is_empty() {
            self.task_cursor = None;
            return;
        }
        let last = note.tasks.len() as i32 - 1;
        let next = match self.task_cursor {
            Some(i) => (i as i32 + delta).clamp(0, last),
            None if delta < 0 => last,
            None => 0,
        };
        self.task_cursor = Some(next as usize);
    }

    pub fn selected_task_id(&self) -> Option<&RecordId> {
        let note = self.selected_note()?;
        note.tasks.get(self.task_cursor?).map(|t| &t.id)
    }

    pub fn task_completed(&self, id: &RecordId) -> Option<bool> {
        self.notes
            .iter()
            .flat_map(|n| n.tasks.iter())
            .find(|t| &t.id == id)
            .map(|t| t.is_completed)
    }

    /// Records a toggle request and returns the state it asks for.
    /// Presses made before earlier ones are acknowledged flip the pending target.
    pub fn request_toggle(&mut self, id: &RecordId) -> Option<bool> {
        let confirmed = self.task_completed(id)?;
        let entry = self.toggles.entry(id.clone()).or_insert((confirmed, 0));
        entry.0 = !entry.0;
        entry.1 += 1;
        Some(entry.0)
    }

    pub fn toggle_in_flight(&self, id: &RecordId) -> bool {
        self.toggles.contains_key(id)
    }

    /// One toggle for `id` finished. Returns the latest requested state once none remain.
    pub fn finish_toggle(&mut self, id: &RecordId) -> Option<bool> {
        let entry = self.toggles.get_mut(id)?;
        entry.1 = entry.1.saturating_sub(1);
        if entry.1 > 0 {
            return None;
        }
        self.toggles.remove(id).map(|(target, _)| target)
    }

    pub fn set_task_completed(&mut self, id: &RecordId, is_completed: bool) -> bool {
        match self.notes.iter_mut().find_map(|n| n.task_mut(id)) {
            Some(task) => {
                task.is_completed = is_completed;
                true
            }
            None => false,
        }
    }

    fn clamp_task_cursor(&mut self) {
        let task_count = self.selected_note().map_or(0, |n| n.tasks.len());
        self.task_cursor = match self.task_cursor {
            _ if task_count == 0 => None,
            Some(i) => Some(i.min(task_count - 1)),
            None => None,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerField {
    Title,
    Tasks,
    Color,
}

/// The create-note dialog.
pub struct Composer<'a> {
    pub open: bool,
    pub pending: bool,
    pub focus: ComposerField,
    pub title: TextArea<'a>,
    pub tasks: TextArea<'a>,
    color: NoteColor,
}

impl Default for Composer<'_> {
    fn default() -> Self {
        Self {
            open: false,
            pending: false,
            focus: ComposerField::Title,
            title: TextArea::default(),
            tasks: TextArea::default(),
            color: NoteColor::Yellow,
        }
    }
}

impl<'a> Composer<'a> {
    pub fn color(&self) -> NoteColor {
        self.color
    }

    pub fn select_color(&mut self, color: NoteColor) {
        self.color = color;
    }

    /// Whether `color` carries the selection ring.
    pub fn is_ringed(&self, color: NoteColor) -> bool {
        self.color == color
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = TextArea::from([title]);
    }

    pub fn set_tasks(&mut self, raw: &str) {
        self.tasks = TextArea::from(raw.split('\n'));
    }

    pub fn draft(&self) -> NewNote {
        NewNote {
            title: self.title.lines().join(" ").trim().to_string(),
            tasks: parse_task_lines(&self.tasks.lines().join("\n")),
            color: self.color,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            ComposerField::Title => ComposerField::Tasks,
            ComposerField::Tasks => ComposerField::Color,
            ComposerField::Color => ComposerField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.focus = match self.focus {
            ComposerField::Title => ComposerField::Color,
            ComposerField::Tasks => ComposerField::Title,
            ComposerField::Color => ComposerField::Tasks,
        };
    }

    /// Closes the dialog and clears the form back to yellow.
    pub fn close_and_reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Nickname,
    Fullname,
    Age,
    Dob,
}

impl ProfileField {
    pub const ALL: [ProfileField; 4] = [
        ProfileField::Nickname,
        ProfileField::Fullname,
        ProfileField::Age,
        ProfileField::Dob,
    ];

    pub fn label(self, strings: &Strings) -> &'static str {
        match self {
            ProfileField::Nickname => strings.profile_nickname,
            ProfileField::Fullname => strings.profile_fullname,
            ProfileField::Age => strings.profile_age,
            ProfileField::Dob => strings.profile_dob,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

pub struct ProfileForm<'a> {
    pub fields: [TextArea<'a>; 4],
    pub focus: ProfileField,
}

impl Default for ProfileForm<'_> {
    fn default() -> Self {
        Self {
            fields: Default::default(),
            focus: ProfileField::Nickname,
        }
    }
}

impl<'a> ProfileForm<'a> {
    pub fn fill(&mut self, profile: &Profile) {
        self.set(ProfileField::Nickname, &profile.nickname);
        self.set(ProfileField::Fullname, &profile.fullname);
        self.set(ProfileField::Age, &profile.age);
        self.set(ProfileField::Dob, &profile.dob);
    }

    pub fn set(&mut self, field: ProfileField, value: &str) {
        self.fields[field.index()] = TextArea::from([value]);
    }

    pub fn value(&self, field: ProfileField) -> String {
        self.fields[field.index()].lines().join(" ")
    }

    pub fn snapshot(&self) -> Profile {
        Profile {
            nickname: self.value(ProfileField::Nickname),
            fullname: self.value(ProfileField::Fullname),
            age: self.value(ProfileField::Age),
            dob: self.value(ProfileField::Dob),
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextArea<'a> {
        &mut self.fields[self.focus.index()]
    }

    pub fn move_focus(&mut self, delta: i32) {
        let n = ProfileField::ALL.len() as i32;
        let i = (self.focus.index() as i32 + delta).rem_euclid(n);
        self.focus = ProfileField::ALL[i as usize];
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A popup the user has to dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// One user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SwitchView(View),
    RefreshNotes,
    MoveCard(i32),
    MoveTask(i32),
    OpenComposer,
    CancelComposer,
    SubmitComposer,
    SelectColor(NoteColor),
    FocusNext,
    FocusPrev,
    DeleteNote(RecordId),
    ToggleTask(RecordId),
    PrevMonth,
    NextMonth,
    CurrentMonth(NaiveDate),
    SaveProfile,
    DismissNotice,
    Quit,
}

/// Everything the event loop feeds into `App::update`.
#[derive(Debug)]
pub enum Message {
    Key(KeyEvent),
    Paste(String),
    Intent(Intent),
    NotesLoaded(Result<Vec<Note>, ApiError>),
    NoteCreated(Result<(), ApiError>),
    NoteDeleted(Result<(), ApiError>),
    TaskToggled {
        id: RecordId,
        is_completed: bool,
        result: Result<(), ApiError>,
    },
    ProfileLoaded(Result<Profile, ApiError>),
    ProfileSaved {
        submitted: Profile,
        result: Result<(), ApiError>,
    },
}

/// Network work requested by `update`, run by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchNotes,
    CreateNote(NewNote),
    DeleteNote(RecordId),
    ToggleTask { id: RecordId, is_completed: bool },
    LoadProfile,
    SaveProfile(Profile),
    Quit,
}

pub struct App<'a> {
    pub config: AppConfig,
    pub views: ViewSwitcher,
    pub wall: WallState,
    pub composer: Composer<'a>,
    pub calendar: CalendarState,
    pub profile: ProfileForm<'a>,
    pub header_nickname: String,
    pub notice: Option<Notice>,
    /// Create requests sent and not yet answered.
    pub creating: usize,
}

impl<'a> App<'a> {
    pub fn new(config: AppConfig, today: NaiveDate) -> Self {
        Self {
            config,
            views: ViewSwitcher::default(),
            wall: WallState::default(),
            composer: Composer::default(),
            calendar: CalendarState::new(today),
            profile: ProfileForm::default(),
            header_nickname: String::new(),
            notice: None,
            creating: 0,
        }
    }

    pub fn strings(&self) -> &'static Strings {
        self.config.general.locale.strings()
    }

    /// Default view, calendar on today, and the two independent loads.
    pub fn init(&mut self, today: NaiveDate) -> Vec<Effect> {
        self.views.switch_view(View::Wall);
        self.calendar.reset(today);
        vec![Effect::FetchNotes, Effect::LoadProfile]
    }

    pub fn update(&mut self, msg: Message) -> Vec<Effect> {
        match msg {
            Message::Key(key) => self.handle_key(key),
            Message::Paste(text) => {
                let text = if self.focused_is_multiline() {
                    text.replace('\r', "")
                } else {
                    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
                };
                if let Some(textarea) = self.focused_textarea_mut() {
                    textarea.insert_str(text);
                }
                Vec::new()
            }
            Message::Intent(intent) => self.dispatch(intent),
            Message::NotesLoaded(Ok(notes)) => {
                crate::logger::log(&format!("Loaded {} notes", notes.len()));
                self.wall.replace(notes);
                Vec::new()
            }
            Message::NotesLoaded(Err(e)) => {
                crate::logger::log(&format!("Fetch notes error: {}", e));
                Vec::new()
            }
            Message::NoteCreated(result) => {
                self.creating = self.creating.saturating_sub(1);
                if self.composer.pending {
                    self.composer.close_and_reset();
                }
                if let Err(e) = result {
                    crate::logger::log(&format!("Create note error: {}", e));
                    self.fail(self.strings().note_create_failed);
                }
                vec![Effect::FetchNotes]
            }
            Message::NoteDeleted(result) => {
                if let Err(e) = result {
                    crate::logger::log(&format!("Delete note error: {}", e));
                    self.fail(self.strings().note_delete_failed);
                }
                vec![Effect::FetchNotes]
            }
            Message::TaskToggled {
                id,
                is_completed,
                result,
            } => {
                let settled = self.wall.finish_toggle(&id).unwrap_or(is_completed);
                self.wall.set_task_completed(&id, settled);
                match result {
                    Ok(()) => Vec::new(),
                    Err(e) => {
                        crate::logger::log(&format!("Toggle task {} error: {}", id, e));
                        self.fail(self.strings().task_toggle_failed);
                        vec![Effect::FetchNotes]
                    }
                }
            }
            Message::ProfileLoaded(Ok(profile)) => {
                self.profile.fill(&profile);
                self.header_nickname = profile.nickname;
                Vec::new()
            }
            Message::ProfileLoaded(Err(e)) => {
                crate::logger::log(&format!("Error loading profile: {}", e));
                Vec::new()
            }
            Message::ProfileSaved { submitted, result } => {
                match result {
                    Ok(()) => {
                        self.header_nickname = submitted.nickname;
                        self.notice = Some(Notice {
                            kind: NoticeKind::Success,
                            text: self.strings().profile_saved.to_string(),
                        });
                    }
                    Err(e) => {
                        crate::logger::log(&format!("Error saving profile: {}", e));
                        self.fail(self.strings().profile_save_failed);
                    }
                }
                Vec::new()
            }
        }
    }

    pub fn dispatch(&mut self, intent: Intent) -> Vec<Effect> {
        match intent {
            Intent::SwitchView(view) => self.views.switch_view(view),
            Intent::RefreshNotes => return vec![Effect::FetchNotes],
            Intent::MoveCard(delta) => self.wall.move_card(delta),
            Intent::MoveTask(delta) => self.wall.move_task(delta),
            Intent::OpenComposer => {
                self.composer.open = true;
                self.composer.focus = ComposerField::Title;
            }
            Intent::CancelComposer => self.composer.close_and_reset(),
            Intent::SubmitComposer => {
                if !self.composer.open || self.composer.pending {
                    return Vec::new();
                }
                let draft = self.composer.draft();
                if draft.title.is_empty() {
                    self.composer.focus = ComposerField::Title;
                    return Vec::new();
                }
                self.composer.pending = true;
                self.creating += 1;
                return vec![Effect::CreateNote(draft)];
            }
            Intent::SelectColor(color) => self.composer.select_color(color),
            Intent::FocusNext => self.move_focus(1),
            Intent::FocusPrev => self.move_focus(-1),
            Intent::DeleteNote(id) => return vec![Effect::DeleteNote(id)],
            Intent::ToggleTask(id) => {
                if let Some(is_completed) = self.wall.request_toggle(&id) {
                    return vec![Effect::ToggleTask { id, is_completed }];
                }
            }
            Intent::PrevMonth => self.calendar.prev_month(),
            Intent::NextMonth => self.calendar.next_month(),
            Intent::CurrentMonth(today) => self.calendar.reset(today),
            Intent::SaveProfile => return vec![Effect::SaveProfile(self.profile.snapshot())],
            Intent::DismissNotice => self.notice = None,
            Intent::Quit => return vec![Effect::Quit],
        }
        Vec::new()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match input::route(self, key) {
            Route::Intent(intent) => self.dispatch(intent),
            Route::Text(key) => {
                if let Some(textarea) = self.focused_textarea_mut() {
                    textarea.input(key);
                }
                Vec::new()
            }
            Route::Ignore => Vec::new(),
        }
    }

    /// The text field that receives typed characters, if any.
    pub fn focused_textarea_mut(&mut self) -> Option<&mut TextArea<'a>> {
        if self.notice.is_some() {
            return None;
        }
        if self.composer.open {
            return match self.composer.focus {
                ComposerField::Title => Some(&mut self.composer.title),
                ComposerField::Tasks => Some(&mut self.composer.tasks),
                ComposerField::Color => None,
            };
        }
        if self.views.is_visible(View::Profile) {
            return Some(self.profile.focused_mut());
        }
        None
    }

    fn focused_is_multiline(&self) -> bool {
        self.composer.open && self.composer.focus == ComposerField::Tasks
    }

    fn move_focus(&mut self, delta: i32) {
        if self.composer.open {
            if delta > 0 {
                self.composer.next_field();
            } else {
                self.composer.prev_field();
            }
        } else if self.views.is_visible(View::Profile) {
            self.profile.move_focus(delta);
        }
    }

    fn fail(&mut self, text: &str) {
        self.notice = Some(Notice {
            kind: NoticeKind::Failure,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use crossterm::event::{KeyCode, KeyModifiers};
    use reqwest::StatusCode;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn app() -> App<'static> {
        App::new(AppConfig::default(), today())
    }

    fn task(id: i64, content: &str, done: bool) -> Task {
        Task {
            id: RecordId::Int(id),
            content: content.to_string(),
            is_completed: done,
        }
    }

    fn note(id: i64, title: &str, tasks: Vec<Task>) -> Note {
        Note {
            id: RecordId::Int(id),
            title: title.to_string(),
            color: NoteColor::Yellow,
            tasks,
        }
    }

    fn server_error() -> ApiError {
        ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    #[test]
    fn init_shows_wall_and_loads_notes_and_profile() {
        let mut app = app();
        app.dispatch(Intent::SwitchView(View::Profile));
        app.calendar.next_month();

        let effects = app.init(today());
        assert_eq!(effects, vec![Effect::FetchNotes, Effect::LoadProfile]);
        assert_eq!(app.views.active(), View::Wall);
        assert_eq!(app.calendar.month(), 10);
    }

    #[test]
    fn exactly_one_view_visible_after_any_switches() {
        let mut app = app();
        let sequence = [
            View::Calendar,
            View::Calendar,
            View::Profile,
            View::Wall,
            View::Profile,
            View::Profile,
        ];
        for target in sequence {
            app.dispatch(Intent::SwitchView(target));
            let visible: Vec<View> = View::ALL
                .into_iter()
                .filter(|v| app.views.is_visible(*v))
                .collect();
            assert_eq!(visible, vec![target]);
            let active_links = View::ALL
                .into_iter()
                .filter(|v| app.views.link_style(*v) == LinkStyle::Active)
                .count();
            assert_eq!(active_links, 1);
        }
    }

    #[test]
    fn empty_wall_has_message_and_one_add_card() {
        let mut app = app();
        app.update(Message::NotesLoaded(Ok(Vec::new())));
        assert_eq!(app.wall.cards(), vec![WallCard::EmptyState, WallCard::AddNote]);
        assert!(app.wall.add_card_selected());
    }

    #[test]
    fn wall_cards_follow_response_order() {
        let mut app = app();
        let notes = vec![note(2, "second", vec![]), note(1, "first", vec![])];
        app.update(Message::NotesLoaded(Ok(notes.clone())));
        assert_eq!(
            app.wall.cards(),
            vec![
                WallCard::Note(&notes[0]),
                WallCard::Note(&notes[1]),
                WallCard::AddNote
            ]
        );
    }

    #[test]
    fn failed_fetch_keeps_previous_wall() {
        let mut app = app();
        app.update(Message::NotesLoaded(Ok(vec![note(1, "keep", vec![])])));
        let effects = app.update(Message::NotesLoaded(Err(server_error())));
        assert!(effects.is_empty());
        assert_eq!(app.wall.notes().len(), 1);
        assert!(app.notice.is_none());
    }

    #[test]
    fn toggle_requests_the_flipped_state() {
        let mut app = app();
        app.update(Message::NotesLoaded(Ok(vec![note(
            1,
            "n",
            vec![task(10, "a", false), task(11, "b", true)],
        )])));

        assert_eq!(
            app.dispatch(Intent::ToggleTask(RecordId::Int(10))),
            vec![Effect::ToggleTask {
                id: RecordId::Int(10),
                is_completed: true
            }]
        );
        assert_eq!(
            app.dispatch(Intent::ToggleTask(RecordId::Int(11))),
            vec![Effect::ToggleTask {
                id: RecordId::Int(11),
                is_completed: false
            }]
        );
        assert!(app.dispatch(Intent::ToggleTask(RecordId::Int(99))).is_empty());
    }

    #[test]
    fn toggle_applies_regardless_of_response_and_double_toggle_restores() {
        let mut app = app();
        let id = RecordId::Int(10);
        app.update(Message::NotesLoaded(Ok(vec![note(1, "n", vec![task(10, "a", false)])])));

        for _ in 0..2 {
            let Effect::ToggleTask { id, is_completed } =
                app.dispatch(Intent::ToggleTask(RecordId::Int(10))).remove(0)
            else {
                panic!("expected a toggle effect");
            };
            let effects = app.update(Message::TaskToggled {
                id,
                is_completed,
                result: Ok(()),
            });
            assert!(effects.is_empty());
        }
        assert_eq!(app.wall.task_completed(&id), Some(false));

        let effects = app.update(Message::TaskToggled {
            id: id.clone(),
            is_completed: true,
            result: Err(server_error()),
        });
        assert_eq!(app.wall.task_completed(&id), Some(true));
        assert_eq!(effects, vec![Effect::FetchNotes]);
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Failure));
    }

    #[test]
    fn submit_sends_trimmed_tasks_and_color() {
        let mut app = app();
        app.dispatch(Intent::OpenComposer);
        app.composer.set_title("Groceries");
        app.composer.set_tasks("a\n\nb\n  \nc");
        app.dispatch(Intent::SelectColor(NoteColor::Blue));

        let effects = app.dispatch(Intent::SubmitComposer);
        assert_eq!(
            effects,
            vec![Effect::CreateNote(NewNote {
                title: "Groceries".into(),
                tasks: vec!["a".into(), "b".into(), "c".into()],
                color: NoteColor::Blue,
            })]
        );
        assert!(app.composer.pending);
        assert!(app.dispatch(Intent::SubmitComposer).is_empty());
    }

    #[test]
    fn completion_closes_resets_and_refetches_even_on_failure() {
        for result in [Ok(()), Err(server_error())] {
            let failed = result.is_err();
            let mut app = app();
            app.dispatch(Intent::OpenComposer);
            app.composer.set_title("x");
            app.dispatch(Intent::SelectColor(NoteColor::Pink));
            app.dispatch(Intent::SubmitComposer);

            let effects = app.update(Message::NoteCreated(result));
            assert_eq!(effects, vec![Effect::FetchNotes]);
            assert!(!app.composer.open);
            assert!(!app.composer.pending);
            assert_eq!(app.composer.color(), NoteColor::Yellow);
            assert!(app.composer.draft().title.is_empty());
            assert_eq!(app.notice.is_some(), failed);
        }
    }

    #[test]
    fn blank_title_is_not_submitted() {
        let mut app = app();
        app.dispatch(Intent::OpenComposer);
        app.composer.set_tasks("only tasks");
        assert!(app.dispatch(Intent::SubmitComposer).is_empty());
        assert!(app.composer.open);
        assert!(!app.composer.pending);
    }

    #[test]
    fn cancel_resets_color_to_yellow() {
        let mut app = app();
        app.dispatch(Intent::OpenComposer);
        app.dispatch(Intent::SelectColor(NoteColor::Orange));
        app.dispatch(Intent::CancelComposer);
        assert!(!app.composer.open);
        assert_eq!(app.composer.color(), NoteColor::Yellow);
    }

    #[test]
    fn exactly_one_color_is_ringed() {
        let mut app = app();
        for pick in NoteColor::ALL {
            app.dispatch(Intent::SelectColor(pick));
            let ringed: Vec<NoteColor> = NoteColor::ALL
                .into_iter()
                .filter(|c| app.composer.is_ringed(*c))
                .collect();
            assert_eq!(ringed, vec![pick]);
        }
    }

    #[test]
    fn delete_refetches_and_reports_failure() {
        let mut app = app();
        assert_eq!(
            app.dispatch(Intent::DeleteNote(RecordId::Int(3))),
            vec![Effect::DeleteNote(RecordId::Int(3))]
        );
        assert_eq!(app.update(Message::NoteDeleted(Ok(()))), vec![Effect::FetchNotes]);
        assert!(app.notice.is_none());
        assert_eq!(
            app.update(Message::NoteDeleted(Err(server_error()))),
            vec![Effect::FetchNotes]
        );
        assert!(app.notice.is_some());
    }

    #[test]
    fn profile_load_fills_form_and_header() {
        let mut app = app();
        app.update(Message::ProfileLoaded(Ok(Profile {
            nickname: "Dewi".into(),
            fullname: "Dewi Lestari".into(),
            age: "31".into(),
            dob: String::new(),
        })));
        assert_eq!(app.header_nickname, "Dewi");
        assert_eq!(app.profile.value(ProfileField::Fullname), "Dewi Lestari");
        assert_eq!(app.profile.value(ProfileField::Dob), "");

        app.update(Message::ProfileLoaded(Err(server_error())));
        assert_eq!(app.header_nickname, "Dewi");
        assert_eq!(app.profile.value(ProfileField::Age), "31");
    }

    #[test]
    fn failed_save_keeps_header_and_notifies() {
        let mut app = app();
        app.header_nickname = "old".into();
        app.profile.set(ProfileField::Nickname, "new");

        let Effect::SaveProfile(submitted) = app.dispatch(Intent::SaveProfile).remove(0) else {
            panic!("expected a save effect");
        };
        assert_eq!(submitted.nickname, "new");

        app.update(Message::ProfileSaved {
            submitted,
            result: Err(ApiError::Status(StatusCode::BAD_REQUEST)),
        });
        assert_eq!(app.header_nickname, "old");
        assert_eq!(
            app.notice,
            Some(Notice {
                kind: NoticeKind::Failure,
                text: "Failed to save profile.".into()
            })
        );
    }

    #[test]
    fn successful_save_sets_header_to_submitted_value() {
        let mut app = app();
        app.header_nickname = "old".into();
        app.profile.set(ProfileField::Nickname, "submitted");
        let Effect::SaveProfile(submitted) = app.dispatch(Intent::SaveProfile).remove(0) else {
            panic!("expected a save effect");
        };
        app.profile.set(ProfileField::Nickname, "edited since");

        app.update(Message::ProfileSaved {
            submitted,
            result: Ok(()),
        });
        assert_eq!(app.header_nickname, "submitted");
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Success));

        app.dispatch(Intent::DismissNotice);
        assert!(app.notice.is_none());
    }

    #[test]
    fn calendar_intents_move_the_reference_month() {
        let mut app = app();
        app.dispatch(Intent::NextMonth);
        app.dispatch(Intent::NextMonth);
        app.dispatch(Intent::NextMonth);
        assert_eq!((app.calendar.year(), app.calendar.month()), (2027, 1));
        app.dispatch(Intent::PrevMonth);
        assert_eq!((app.calendar.year(), app.calendar.month()), (2026, 12));
        app.dispatch(Intent::CurrentMonth(today()));
        assert_eq!((app.calendar.year(), app.calendar.month()), (2026, 10));
    }

    #[test]
    fn cursor_survives_a_shrinking_wall() {
        let mut app = app();
        app.update(Message::NotesLoaded(Ok(vec![
            note(1, "a", vec![task(1, "x", false)]),
            note(2, "b", vec![task(2, "y", false), task(3, "z", false)]),
        ])));
        app.dispatch(Intent::MoveCard(1));
        app.dispatch(Intent::MoveTask(1));
        app.dispatch(Intent::MoveTask(1));
        assert_eq!(app.wall.selected_task_id(), Some(&RecordId::Int(3)));

        app.update(Message::NotesLoaded(Ok(vec![note(1, "a", vec![task(1, "x", false)])])));
        assert_eq!(app.wall.selected(), 1);
        assert!(app.wall.add_card_selected());
        assert_eq!(app.wall.task_cursor(), None);
    }

    fn press(code: KeyCode) -> Message {
        Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn unanswered_create_does_not_trap_the_dialog() {
        let mut app = app();
        app.dispatch(Intent::OpenComposer);
        app.composer.set_title("x");
        assert_eq!(app.dispatch(Intent::SubmitComposer).len(), 1);

        app.update(press(KeyCode::Esc));
        app.update(press(KeyCode::F(2)));
        assert!(!app.composer.open);
        assert_eq!(app.views.active(), View::Calendar);
        assert_eq!(app.creating, 1);

        assert_eq!(app.update(Message::NoteCreated(Ok(()))), vec![Effect::FetchNotes]);
        assert_eq!(app.creating, 0);
    }

    #[test]
    fn late_completion_leaves_a_fresh_dialog_alone() {
        let mut app = app();
        app.dispatch(Intent::OpenComposer);
        app.composer.set_title("first");
        app.dispatch(Intent::SubmitComposer);
        app.dispatch(Intent::CancelComposer);

        app.dispatch(Intent::OpenComposer);
        app.composer.set_title("second");
        app.dispatch(Intent::SelectColor(NoteColor::Blue));

        let effects = app.update(Message::NoteCreated(Err(server_error())));
        assert_eq!(effects, vec![Effect::FetchNotes]);
        assert!(app.composer.open);
        assert_eq!(app.composer.draft().title, "second");
        assert_eq!(app.composer.color(), NoteColor::Blue);
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Failure));
    }

    #[test]
    fn two_presses_before_any_ack_restore_the_task() {
        let mut app = app();
        let id = RecordId::Int(10);
        app.update(Message::NotesLoaded(Ok(vec![note(1, "n", vec![task(10, "a", false)])])));

        let first = app.dispatch(Intent::ToggleTask(id.clone()));
        let second = app.dispatch(Intent::ToggleTask(id.clone()));
        assert_eq!(
            first,
            vec![Effect::ToggleTask {
                id: id.clone(),
                is_completed: true
            }]
        );
        assert_eq!(
            second,
            vec![Effect::ToggleTask {
                id: id.clone(),
                is_completed: false
            }]
        );
        assert!(app.wall.toggle_in_flight(&id));

        for is_completed in [true, false] {
            app.update(Message::TaskToggled {
                id: id.clone(),
                is_completed,
                result: Ok(()),
            });
        }
        assert_eq!(app.wall.task_completed(&id), Some(false));
        assert!(!app.wall.toggle_in_flight(&id));
    }

    #[test]
    fn out_of_order_acks_settle_on_the_last_press() {
        let mut app = app();
        let id = RecordId::Int(10);
        app.update(Message::NotesLoaded(Ok(vec![note(1, "n", vec![task(10, "a", false)])])));

        app.dispatch(Intent::ToggleTask(id.clone()));
        app.dispatch(Intent::ToggleTask(id.clone()));
        app.dispatch(Intent::ToggleTask(id.clone()));

        for is_completed in [true, true, false] {
            app.update(Message::TaskToggled {
                id: id.clone(),
                is_completed,
                result: Ok(()),
            });
        }
        assert_eq!(app.wall.task_completed(&id), Some(true));
    }

    #[test]
    fn paste_into_single_line_fields_joins_lines_with_spaces() {
        let mut app = app();
        app.dispatch(Intent::SwitchView(View::Profile));
        app.update(Message::Paste("Dewi\r\nLestari\nPutri".into()));
        assert_eq!(app.profile.value(ProfileField::Nickname), "Dewi Lestari Putri");

        app.dispatch(Intent::OpenComposer);
        app.update(Message::Paste("Weekend\nplans".into()));
        assert_eq!(app.composer.draft().title, "Weekend plans");

        app.dispatch(Intent::FocusNext);
        app.update(Message::Paste("eggs\r\nmilk".into()));
        assert_eq!(
            app.composer.draft().tasks,
            vec!["eggs".to_string(), "milk".to_string()]
        );
    }
}
