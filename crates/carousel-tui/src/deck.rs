//! Terminal host for the carousel engine
//!
//! A [`CardDeck`] is a list of card titles plus a free-list of [`CardSlot`]s.
//! Geometry is in terminal cells, relative to the carousel area.

use carousel_core::{
    DataSource, Emphasis, Padding, Position, Rect, RenderSurface, Size, SlotProvider, Viewport,
};

const TITLE_WORDS: &[&str] = &[
    "Aurora", "Basalt", "Cinder", "Delta", "Ember", "Fjord", "Glacier", "Harbor", "Iris",
    "Juniper", "Kestrel", "Lumen", "Meadow", "Nimbus", "Onyx", "Prairie", "Quartz", "Reef",
    "Sierra", "Tundra", "Umber", "Vale", "Willow", "Zephyr",
];

/// A reusable card
#[derive(Debug, Clone)]
pub struct CardSlot {
    /// Instance identity, stable across reuse
    pub id: usize,
    pub position: Position,
    pub title: String,
    /// Content rectangle from the last placement
    pub area: Option<Rect>,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub created: usize,
    pub reused: usize,
    pub released: usize,
}

#[derive(Debug)]
pub struct CardDeck {
    titles: Vec<String>,
    card_size: Size,
    viewport: Viewport,
    pool: Vec<CardSlot>,
    stats: PoolStats,
}

impl CardDeck {
    pub fn new(titles: Vec<String>, card_width: u16, card_height: u16) -> Self {
        Self {
            titles,
            card_size: Size::new(card_width as i32, card_height as i32),
            viewport: Viewport::default(),
            pool: Vec::new(),
            stats: PoolStats::default(),
        }
    }

    /// Deck of `count` generated titles
    pub fn with_count(count: usize, card_width: u16, card_height: u16) -> Self {
        let titles = (0..count)
            .map(|i| {
                let word = TITLE_WORDS[i % TITLE_WORDS.len()];
                format!("{} {}", word, i + 1)
            })
            .collect();
        Self::new(titles, card_width, card_height)
    }

    /// Adopt the size of the carousel area. Cards are centered vertically.
    pub fn set_area(&mut self, width: u16, height: u16) {
        let top = (height as i32 - self.card_size.height).max(0) / 2;
        self.viewport = Viewport::new(width as i32, height as i32).with_padding(Padding {
            top,
            ..Default::default()
        });
    }

    pub fn title(&self, position: Position) -> Option<&str> {
        self.titles.get(position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn card_size(&self) -> Size {
        self.card_size
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Cards waiting in the free-list
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }
}

impl DataSource for CardDeck {
    fn count(&self) -> usize {
        self.titles.len()
    }
}

impl SlotProvider<CardSlot> for CardDeck {
    fn acquire(&mut self, position: Position) -> CardSlot {
        let title = self.titles.get(position).cloned().unwrap_or_default();
        match self.pool.pop() {
            Some(mut card) => {
                self.stats.reused += 1;
                card.position = position;
                card.title = title;
                card.emphasis = Emphasis::default();
                card
            }
            None => {
                self.stats.created += 1;
                CardSlot {
                    id: self.stats.created,
                    position,
                    title,
                    area: None,
                    emphasis: Emphasis::default(),
                }
            }
        }
    }

    fn release(&mut self, mut card: CardSlot) {
        self.stats.released += 1;
        card.area = None;
        self.pool.push(card);
    }
}

impl RenderSurface<CardSlot> for CardDeck {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn measure(&mut self, _card: &CardSlot) -> Size {
        self.card_size
    }

    fn place(&mut self, card: &mut CardSlot, rect: Rect) {
        card.area = Some(rect);
    }

    fn apply_emphasis(&mut self, card: &mut CardSlot, emphasis: Emphasis) {
        card.emphasis = emphasis;
    }
}
