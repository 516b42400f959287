use serde::Serialize;

use super::{ReportView, Row};
use crate::report::{GalleryPhoto, Photos};

/// Shown in place of the gallery image when there is no photo.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/800x600?text=No+Image";

pub const DISCLAIMER: [&str; 3] = [
    "1. 本報告僅代表本鑑定中心在檢測當下，根據物件現況所作之專業技術評估，不代表該物件之市場估價或未來之增值保證。",
    "2. 鑑定結果僅對檢測物件本身負責。若物件經二次拆解、改裝或人為破壞，本報告即行失效。",
    "3. 鑑定數據受限於檢測設備之精確度及當時之環境因素，可能存在微小誤差，僅供參考。",
];

// ── Variant configuration ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewVariant {
    Full,
    Compact,
    Print,
}

impl std::str::FromStr for ViewVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(ViewVariant::Full),
            "compact" => Ok(ViewVariant::Compact),
            "print" => Ok(ViewVariant::Print),
            other => Err(format!(
                "Unknown view variant {:?} (expected full, compact or print)",
                other
            )),
        }
    }
}

/// Switches that distinguish the report page variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    pub photo_gallery: bool,
    pub emphasized_conclusion: bool,
    pub actions: bool,
}

impl ViewConfig {
    pub fn full() -> Self {
        ViewConfig {
            photo_gallery: true,
            emphasized_conclusion: true,
            actions: true,
        }
    }

    /// Single hero image, no gallery, no share/download buttons.
    pub fn compact() -> Self {
        ViewConfig {
            photo_gallery: false,
            emphasized_conclusion: false,
            actions: false,
        }
    }

    /// What goes into the exported document.
    pub fn print() -> Self {
        ViewConfig {
            photo_gallery: true,
            emphasized_conclusion: true,
            actions: false,
        }
    }

    pub fn for_variant(variant: ViewVariant) -> Self {
        match variant {
            ViewVariant::Full => Self::full(),
            ViewVariant::Compact => Self::compact(),
            ViewVariant::Print => Self::print(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::full()
    }
}

// ── Gallery ────────────────────────────────────────────────────────

/// Normalized photo sequence plus the currently displayed index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    photos: Vec<GalleryPhoto>,
    active: usize,
}

impl Gallery {
    pub fn new(photos: Vec<GalleryPhoto>) -> Self {
        Gallery { photos, active: 0 }
    }

    pub fn from_photos(photos: &Photos) -> Self {
        Self::new(photos.gallery().collect())
    }

    pub fn photos(&self) -> &[GalleryPhoto] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// `None` on an empty gallery; render the placeholder instead.
    pub fn active(&self) -> Option<&GalleryPhoto> {
        self.photos.get(self.active)
    }

    pub fn active_index(&self) -> Option<usize> {
        if self.photos.is_empty() {
            None
        } else {
            Some(self.active)
        }
    }

    /// Image shown wherever a photo is missing.
    pub fn placeholder_url() -> &'static str {
        PLACEHOLDER_IMAGE_URL
    }

    /// URL to display for the active slot, falling back to the placeholder.
    pub fn display_url(&self) -> &str {
        self.active()
            .map(|p| p.url.as_str())
            .unwrap_or(Self::placeholder_url())
    }

    /// Select a thumbnail. Out-of-range indices are clamped to the last photo.
    pub fn select(&mut self, index: usize) {
        self.active = index.min(self.photos.len().saturating_sub(1));
    }

    pub fn next(&mut self) {
        if !self.photos.is_empty() {
            self.active = (self.active + 1) % self.photos.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.photos.is_empty() {
            self.active = (self.active + self.photos.len() - 1) % self.photos.len();
        }
    }

    /// Recompute from the latest photo record, keeping the index in range.
    pub fn refresh(&mut self, photos: &Photos) {
        self.photos = photos.gallery().collect();
        self.select(self.active);
    }
}

// ── Issuer details ─────────────────────────────────────────────────

/// Who issued the report and when. Supplied by the host; a field left as
/// `None` is simply not rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appraisal_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appraiser_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appraiser_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl PageMeta {
    /// Header badge text, e.g. `鑑定編號: #20240325-001`.
    pub fn badge(&self) -> Option<String> {
        self.appraisal_number
            .as_ref()
            .map(|number| format!("鑑定編號: #{}", number))
    }

    pub fn is_empty(&self) -> bool {
        *self == PageMeta::default()
    }
}

// ── Page model ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PageAction {
    Share,
    DownloadPdf,
}

impl PageAction {
    pub fn label(self) -> &'static str {
        match self {
            PageAction::Share => "分享報告",
            PageAction::DownloadPdf => "下載 PDF",
        }
    }
}

/// A report view shaped for one page variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageModel {
    pub config: ViewConfig,
    pub brand: String,
    pub model_number: String,
    pub serial_number: String,
    pub warranty_date: String,
    /// Front photo or the placeholder. Never another slot.
    pub hero_url: String,
    /// Present only when the variant shows a gallery.
    pub gallery: Option<Gallery>,
    /// Overall row, split out when the variant emphasizes it.
    pub emphasized: Option<Row>,
    /// Remaining conclusion rows (all four when nothing is emphasized).
    pub conclusions: Vec<Row>,
    pub status: Vec<Row>,
    pub performance: Vec<Row>,
    pub quoted_notes: String,
    pub tag_chips: Vec<String>,
    pub disclaimer: Vec<&'static str>,
    pub actions: Vec<PageAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub meta: PageMeta,
}

impl PageModel {
    pub fn build(view: &ReportView, config: ViewConfig) -> Self {
        let gallery = Gallery::new(view.photos.clone());
        let hero_url = view
            .front_photo
            .clone()
            .unwrap_or_else(|| Gallery::placeholder_url().to_string());

        let (emphasized, conclusions) = if config.emphasized_conclusion {
            let mut rows = view.conclusions.iter().cloned();
            let overall = rows.next();
            (overall, rows.collect())
        } else {
            (None, view.conclusions.clone())
        };

        let actions = if config.actions {
            vec![PageAction::Share, PageAction::DownloadPdf]
        } else {
            Vec::new()
        };

        PageModel {
            config,
            brand: view.brand.clone(),
            model_number: view.model_number.clone(),
            serial_number: view.serial_number.clone(),
            warranty_date: view.warranty_date.clone(),
            hero_url,
            gallery: config.photo_gallery.then_some(gallery),
            emphasized,
            conclusions,
            status: view.status.clone(),
            performance: view.performance.clone(),
            quoted_notes: format!("\"{}\"", view.notes),
            tag_chips: view.tags.iter().map(|t| format!("#{}", t)).collect(),
            disclaimer: DISCLAIMER.to_vec(),
            actions,
            badge: None,
            meta: PageMeta::default(),
        }
    }

    /// Attach the issuer details shown in the header badge, signature
    /// block and footer.
    pub fn with_meta(mut self, meta: PageMeta) -> Self {
        self.badge = meta.badge();
        self.meta = meta;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::report;
    use crate::report::PhotoSlot;

    fn three_photos() -> Photos {
        Photos {
            front: Some("f".into()),
            back: Some("b".into()),
            others: vec!["d".into()],
            ..Photos::default()
        }
    }

    #[test]
    fn empty_gallery_shows_placeholder() {
        let mut gallery = Gallery::from_photos(&Photos::default());
        assert!(gallery.active().is_none());
        assert_eq!(gallery.active_index(), None);
        assert_eq!(gallery.display_url(), PLACEHOLDER_IMAGE_URL);
        assert_eq!(Gallery::placeholder_url(), PLACEHOLDER_IMAGE_URL);

        gallery.next();
        gallery.previous();
        gallery.select(4);
        assert!(gallery.active().is_none());
    }

    #[test]
    fn navigation_wraps_and_select_clamps() {
        let mut gallery = Gallery::from_photos(&three_photos());
        gallery.previous();
        assert_eq!(gallery.active_index(), Some(2));
        gallery.next();
        assert_eq!(gallery.active().unwrap().url, "f");
        gallery.select(10);
        assert_eq!(gallery.active().unwrap().label, "細節 1");
    }

    #[test]
    fn refresh_reflects_latest_record() {
        let mut photos = three_photos();
        let mut gallery = Gallery::from_photos(&photos);
        gallery.select(2);

        photos.others.clear();
        gallery.refresh(&photos);
        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.active_index(), Some(1));

        photos.assign(PhotoSlot::Card, "c".into());
        gallery.refresh(&photos);
        assert_eq!(gallery.photos().last().unwrap().label, "保卡/附件");
    }

    #[test]
    fn full_variant_emphasizes_overall_and_offers_actions() {
        let view = ReportView::project(&report());
        let page = PageModel::build(&view, ViewConfig::full());

        assert_eq!(page.emphasized.as_ref().unwrap().key, "overall");
        assert_eq!(page.conclusions.len(), 3);
        assert!(page.gallery.is_some());
        assert_eq!(page.actions, vec![PageAction::Share, PageAction::DownloadPdf]);
        assert_eq!(page.tag_chips, vec!["#極佳品相", "#全套原裝"]);
        assert!(page.quoted_notes.starts_with('"') && page.quoted_notes.ends_with('"'));
    }

    #[test]
    fn compact_variant_drops_gallery_and_actions() {
        let view = ReportView::project(&report());
        let page = PageModel::build(&view, ViewConfig::compact());

        assert!(page.gallery.is_none());
        assert!(page.emphasized.is_none());
        assert_eq!(page.conclusions.len(), 4);
        assert!(page.actions.is_empty());
        assert_eq!(page.hero_url, "https://img.example/front.jpg");
    }

    #[test]
    fn hero_is_front_photo_or_placeholder() {
        let mut report = report();
        report.photos = Photos {
            back: Some("B".into()),
            others: vec!["d".into()],
            ..Photos::default()
        };
        let view = ReportView::project(&report);
        for config in [ViewConfig::full(), ViewConfig::compact(), ViewConfig::print()] {
            let page = PageModel::build(&view, config);
            assert_eq!(page.hero_url, PLACEHOLDER_IMAGE_URL);
        }

        let page = PageModel::build(&view, ViewConfig::full());
        assert_eq!(page.gallery.unwrap().display_url(), "B");
    }

    #[test]
    fn issuer_details_are_optional_and_injected() {
        let view = ReportView::project(&report());
        let page = PageModel::build(&view, ViewConfig::print());
        assert_eq!(page.badge, None);
        assert!(page.meta.is_empty());
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("badge").is_none());
        assert_eq!(json["meta"], serde_json::json!({}));

        let meta = PageMeta {
            appraisal_number: Some("20240325-001".into()),
            appraiser_name: Some("David Chen".into()),
            appraiser_title: Some("高級鐘錶鑑定專家".into()),
            issued_on: Some("2024年03月25日".into()),
            copyright: None,
        };
        let page = PageModel::build(&view, ViewConfig::print()).with_meta(meta.clone());
        assert_eq!(page.badge.as_deref(), Some("鑑定編號: #20240325-001"));
        assert_eq!(page.meta, meta);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["meta"]["appraiserName"], "David Chen");
        assert_eq!(json["meta"]["issuedOn"], "2024年03月25日");
        assert!(json["meta"].get("copyright").is_none());
    }

    #[test]
    fn variant_names_parse() {
        assert_eq!("Print".parse::<ViewVariant>(), Ok(ViewVariant::Print));
        assert_eq!(ViewConfig::for_variant(ViewVariant::Print), ViewConfig::print());
        assert!("poster".parse::<ViewVariant>().is_err());
    }
}
