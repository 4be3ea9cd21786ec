//! Tab selectors inside detail views
//!
//! Tab content is built from data that is already loaded, so switching tabs
//! is a pure state change and never triggers a load.

/// A closed set of tabs
pub trait TabId: Copy + Eq + 'static {
    const ALL: &'static [Self];

    fn title(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroup<T: TabId> {
    active: usize,
    _tabs: std::marker::PhantomData<T>,
}

impl<T: TabId> Default for TabGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TabId> TabGroup<T> {
    pub fn new() -> Self {
        Self {
            active: 0,
            _tabs: std::marker::PhantomData,
        }
    }

    pub fn active(&self) -> T {
        T::ALL[self.active]
    }

    pub fn set_active(&mut self, tab: T) {
        if let Some(pos) = T::ALL.iter().position(|candidate| *candidate == tab) {
            self.active = pos;
        }
    }

    pub fn next(&mut self) {
        self.active = (self.active + 1) % T::ALL.len();
    }

    pub fn prev(&mut self) {
        self.active = (self.active + T::ALL.len() - 1) % T::ALL.len();
    }

    pub fn is_active(&self, tab: T) -> bool {
        self.active() == tab
    }

    pub fn tabs(&self) -> &'static [T] {
        T::ALL
    }
}

/// Tabs of the tour, city and category detail views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Overview,
    Content,
    Media,
    Seo,
}

impl TabId for DetailTab {
    const ALL: &'static [Self] = &[
        DetailTab::Overview,
        DetailTab::Content,
        DetailTab::Media,
        DetailTab::Seo,
    ];

    fn title(&self) -> &'static str {
        match self {
            DetailTab::Overview => "Overview",
            DetailTab::Content => "Content",
            DetailTab::Media => "Media",
            DetailTab::Seo => "SEO",
        }
    }
}

impl DetailTab {
    /// Record fields shown on this tab
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            DetailTab::Overview => &["title", "name", "city", "country", "price", "tours"],
            DetailTab::Content => &["summary", "description", "body", "duration_hours"],
            DetailTab::Media => &["cover", "images", "gallery", "video"],
            DetailTab::Seo => &["slug", "meta_title", "meta_description"],
        }
    }
}
