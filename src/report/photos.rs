use serde::Serialize;

// ── Photo slots ────────────────────────────────────────────────────

/// The six fixed, single-image photo positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PhotoSlot {
    Front,
    Back,
    Side1,
    Side2,
    Buckle,
    Card,
}

impl PhotoSlot {
    pub const ALL: [PhotoSlot; 6] = [
        PhotoSlot::Front,
        PhotoSlot::Back,
        PhotoSlot::Side1,
        PhotoSlot::Side2,
        PhotoSlot::Buckle,
        PhotoSlot::Card,
    ];

    /// JSON key of the slot inside the `photos` record.
    pub fn key(self) -> &'static str {
        match self {
            PhotoSlot::Front => "front",
            PhotoSlot::Back => "back",
            PhotoSlot::Side1 => "side1",
            PhotoSlot::Side2 => "side2",
            PhotoSlot::Buckle => "buckle",
            PhotoSlot::Card => "card",
        }
    }

    /// Label shown on the empty capture tile.
    pub fn capture_label(self) -> &'static str {
        match self {
            PhotoSlot::Front => "正面",
            PhotoSlot::Back => "背面",
            PhotoSlot::Side1 => "側面1",
            PhotoSlot::Side2 => "側面2",
            PhotoSlot::Buckle => "錶扣",
            PhotoSlot::Card => "保卡",
        }
    }
}

/// Named slots that feed the gallery, in display order. Side shots are
/// captured but never shown in the gallery.
const GALLERY_SLOTS: [(PhotoSlot, &str); 4] = [
    (PhotoSlot::Front, "正面"),
    (PhotoSlot::Back, "背面"),
    (PhotoSlot::Buckle, "錶扣"),
    (PhotoSlot::Card, "保卡/附件"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryPhoto {
    pub url: String,
    pub label: String,
}

// ── Photo record ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Photos {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buckle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
    pub others: Vec<String>,
}

impl Photos {
    /// URL held by a named slot; an empty string counts as absent.
    pub fn get(&self, slot: PhotoSlot) -> Option<&str> {
        let url = match slot {
            PhotoSlot::Front => &self.front,
            PhotoSlot::Back => &self.back,
            PhotoSlot::Side1 => &self.side1,
            PhotoSlot::Side2 => &self.side2,
            PhotoSlot::Buckle => &self.buckle,
            PhotoSlot::Card => &self.card,
        };
        url.as_deref().filter(|u| !u.is_empty())
    }

    fn slot_mut(&mut self, slot: PhotoSlot) -> &mut Option<String> {
        match slot {
            PhotoSlot::Front => &mut self.front,
            PhotoSlot::Back => &mut self.back,
            PhotoSlot::Side1 => &mut self.side1,
            PhotoSlot::Side2 => &mut self.side2,
            PhotoSlot::Buckle => &mut self.buckle,
            PhotoSlot::Card => &mut self.card,
        }
    }

    /// Replace the image in a named slot. Empty URLs are ignored.
    pub fn assign(&mut self, slot: PhotoSlot, url: String) -> bool {
        if url.is_empty() {
            return false;
        }
        *self.slot_mut(slot) = Some(url);
        true
    }

    /// Append detail shots in order. Returns how many were appended.
    pub fn append_others<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.others.len();
        self.others.extend(urls.into_iter().filter(|u| !u.is_empty()));
        self.others.len() - before
    }

    /// Number of detail shots, as shown on the "add more" tile.
    pub fn detail_count(&self) -> usize {
        self.others.len()
    }

    /// Ordered, labeled gallery sequence: front, back, buckle, card, then
    /// every detail shot as "細節 N".
    ///
    /// Labels are assigned before empty entries are dropped, so a detail
    /// shot keeps its position-in-`others` number. The iterator borrows the
    /// record and is cheap to clone, so callers can walk it again; call this
    /// again after any capture to see the new state.
    pub fn gallery(&self) -> impl Iterator<Item = GalleryPhoto> + Clone + '_ {
        let named = GALLERY_SLOTS
            .into_iter()
            .map(move |(slot, label)| (self.get(slot), label.to_string()));
        let details = self
            .others
            .iter()
            .enumerate()
            .map(|(i, url)| (Some(url.as_str()), format!("細節 {}", i + 1)));

        named
            .chain(details)
            .filter_map(|(url, label)| match url {
                Some(url) if !url.is_empty() => Some(GalleryPhoto {
                    url: url.to_string(),
                    label,
                }),
                _ => None,
            })
    }
}

/// Owned snapshot of [`Photos::gallery`].
pub fn normalize(photos: &Photos) -> Vec<GalleryPhoto> {
    photos.gallery().collect()
}

// ── Capture ────────────────────────────────────────────────────────

/// Image picker provided by the host environment.
pub trait PhotoCapture {
    /// Pick one image for a named slot; `None` when the user cancels.
    fn pick_single_image(&mut self, slot: PhotoSlot) -> Option<String>;

    /// Pick any number of detail images.
    fn pick_multiple_images(&mut self) -> Vec<String>;
}

/// Run the picker for one slot and store the result.
pub fn capture_single<C>(photos: &mut Photos, capture: &mut C, slot: PhotoSlot) -> bool
where
    C: PhotoCapture + ?Sized,
{
    match capture.pick_single_image(slot) {
        Some(url) => photos.assign(slot, url),
        None => false,
    }
}

/// Run the multi-picker and append every picked image to `others`.
pub fn capture_multiple<C>(photos: &mut Photos, capture: &mut C) -> usize
where
    C: PhotoCapture + ?Sized,
{
    photos.append_others(capture.pick_multiple_images())
}
