/// Entries that can appear in a menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    PlayAi,
    Resume,
    MainMenu,
    Quit,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::PlayAi => "AI",
            Self::Resume => "Resume",
            Self::MainMenu => "Main Menu",
            Self::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    Start,
    Pause,
}

/// A vertical list of items with one focused entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub kind: MenuKind,
    pub title: &'static str,
    items: Vec<MenuItem>,
    focus: usize,
}

impl Menu {
    /// Play, AI and Quit
    pub fn start() -> Self {
        Self {
            kind: MenuKind::Start,
            title: "KOBRA",
            items: vec![MenuItem::Play, MenuItem::PlayAi, MenuItem::Quit],
            focus: 0,
        }
    }

    /// Resume, Main Menu and Quit
    pub fn pause() -> Self {
        Self {
            kind: MenuKind::Pause,
            title: "PAUSED",
            items: vec![MenuItem::Resume, MenuItem::MainMenu, MenuItem::Quit],
            focus: 0,
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn move_up(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.focus + 1 < self.items.len() {
            self.focus += 1;
        }
    }

    pub fn selected(&self) -> MenuItem {
        self.items[self.focus]
    }
}
