use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A coerced attribute value: canonical decimal integers become `Integer`,
/// everything else stays verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Integer(i64),
    String(String),
}

impl AttrValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Integer(n) => Some(*n),
            AttrValue::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Integer(_) => None,
            AttrValue::String(s) => Some(s),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Integer(n) => write!(f, "{n}"),
            AttrValue::String(s) => write!(f, "{s}"),
        }
    }
}

/// Attributes not promoted to a typed field, keyed by attribute name.
pub type Attributes = BTreeMap<String, AttrValue>;

/// Output shape of the per-page region collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// One collection per region kind.
    #[default]
    Tagged,
    /// A single `contents` sequence in document order.
    Flat,
}

impl OutputMode {
    pub fn from_str_loose(s: &str) -> Option<OutputMode> {
        match s.trim().to_lowercase().as_str() {
            "tagged" => Some(OutputMode::Tagged),
            "flat" => Some(OutputMode::Flat),
            _ => None,
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Tagged => write!(f, "tagged"),
            OutputMode::Flat => write!(f, "flat"),
        }
    }
}

/// The four region kinds every Manga109 page is annotated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Frame,
    Face,
    Body,
    Text,
}

impl RegionKind {
    pub const ALL: [RegionKind; 4] = [
        RegionKind::Frame,
        RegionKind::Face,
        RegionKind::Body,
        RegionKind::Text,
    ];

    pub fn from_tag(tag: &str) -> Option<RegionKind> {
        match tag {
            "frame" => Some(RegionKind::Frame),
            "face" => Some(RegionKind::Face),
            "body" => Some(RegionKind::Body),
            "text" => Some(RegionKind::Text),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionKind::Frame => "frame",
            RegionKind::Face => "face",
            RegionKind::Body => "body",
            RegionKind::Text => "text",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl BoundingBox {
    pub fn width(&self) -> i64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> i64 {
        self.ymax - self.ymin
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub attributes: Attributes,
}

/// One annotated area on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Originating tag name (`frame`, `face`, `body`, `text` or an extension).
    pub kind: String,
    /// Inline text content, present only when the element had some.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub attributes: Attributes,
}

impl Region {
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// The box geometry, if all four corners are integers.
    pub fn bbox(&self) -> Option<BoundingBox> {
        let int = |name: &str| self.attr(name).and_then(AttrValue::as_int);
        Some(BoundingBox {
            xmin: int("xmin")?,
            ymin: int("ymin")?,
            xmax: int("xmax")?,
            ymax: int("ymax")?,
        })
    }
}

/// Regions grouped by kind. The four known kinds are always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaggedRegions {
    pub frame: Vec<Region>,
    pub face: Vec<Region>,
    pub body: Vec<Region>,
    pub text: Vec<Region>,
    /// Collections for tags outside the known four, created on first use.
    pub extensions: BTreeMap<String, Vec<Region>>,
}

impl TaggedRegions {
    pub fn known(&self, kind: RegionKind) -> &[Region] {
        match kind {
            RegionKind::Frame => &self.frame,
            RegionKind::Face => &self.face,
            RegionKind::Body => &self.body,
            RegionKind::Text => &self.text,
        }
    }

    fn known_mut(&mut self, kind: RegionKind) -> &mut Vec<Region> {
        match kind {
            RegionKind::Frame => &mut self.frame,
            RegionKind::Face => &mut self.face,
            RegionKind::Body => &mut self.body,
            RegionKind::Text => &mut self.text,
        }
    }

    /// Look up a collection by tag name. Known kinds always resolve.
    pub fn get(&self, kind: &str) -> Option<&[Region]> {
        match RegionKind::from_tag(kind) {
            Some(known) => Some(self.known(known)),
            None => self.extensions.get(kind).map(Vec::as_slice),
        }
    }

    pub(crate) fn push(&mut self, region: Region) {
        match RegionKind::from_tag(&region.kind) {
            Some(known) => self.known_mut(known).push(region),
            None => self
                .extensions
                .entry(region.kind.clone())
                .or_default()
                .push(region),
        }
    }

    /// Known kinds first in fixed order, then extensions by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Region])> {
        RegionKind::ALL
            .into_iter()
            .map(move |k| (k.as_str(), self.known(k)))
            .chain(
                self.extensions
                    .iter()
                    .map(|(name, regions)| (name.as_str(), regions.as_slice())),
            )
    }

    pub fn len(&self) -> usize {
        self.iter().map(|(_, regions)| regions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageRegions {
    Tagged(TaggedRegions),
    Flat { contents: Vec<Region> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub index: i64,
    pub width: i64,
    pub height: i64,
    pub attributes: Attributes,
    /// Tagged pages serialize `frame`, `face`, `body`, `text` and
    /// `extensions`; flat pages serialize `contents`.
    #[serde(flatten)]
    pub regions: PageRegions,
}

impl Page {
    pub fn mode(&self) -> OutputMode {
        match self.regions {
            PageRegions::Tagged(_) => OutputMode::Tagged,
            PageRegions::Flat { .. } => OutputMode::Flat,
        }
    }

    /// Regions of one kind in document order, whichever shape the page holds.
    pub fn regions_of(&self, kind: &str) -> Vec<&Region> {
        match &self.regions {
            PageRegions::Tagged(tagged) => tagged
                .get(kind)
                .map(|regions| regions.iter().collect())
                .unwrap_or_default(),
            PageRegions::Flat { contents } => {
                contents.iter().filter(|r| r.kind == kind).collect()
            }
        }
    }

    /// Every region on the page. Flat pages yield document order; tagged
    /// pages yield kind by kind.
    pub fn all_regions(&self) -> Vec<&Region> {
        match &self.regions {
            PageRegions::Tagged(tagged) => tagged
                .iter()
                .flat_map(|(_, regions)| regions.iter())
                .collect(),
            PageRegions::Flat { contents } => contents.iter().collect(),
        }
    }

    pub fn region_count(&self) -> usize {
        match &self.regions {
            PageRegions::Tagged(tagged) => tagged.len(),
            PageRegions::Flat { contents } => contents.len(),
        }
    }
}

/// Normalized annotation of one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationDocument {
    pub title: String,
    pub characters: Vec<Character>,
    pub pages: Vec<Page>,
}

impl AnnotationDocument {
    /// Find a page by its `index` attribute (not its position).
    pub fn page(&self, index: i64) -> Option<&Page> {
        self.pages.iter().find(|p| p.index == index)
    }

    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(kind: &str, id: &str) -> Region {
        Region {
            id: Some(id.to_string()),
            kind: kind.to_string(),
            text: None,
            attributes: Attributes::new(),
        }
    }

    #[test]
    fn test_tagged_push_routes_by_kind() {
        let mut tagged = TaggedRegions::default();
        tagged.push(region("face", "a"));
        tagged.push(region("onomatopoeia", "b"));
        tagged.push(region("face", "c"));

        assert_eq!(tagged.face.len(), 2);
        assert_eq!(tagged.extensions["onomatopoeia"].len(), 1);
        assert_eq!(tagged.len(), 3);
        assert!(tagged.get("frame").unwrap().is_empty());
        assert!(tagged.get("missing").is_none());
    }

    #[test]
    fn test_tagged_iter_order() {
        let mut tagged = TaggedRegions::default();
        tagged.push(region("zz", "1"));
        tagged.push(region("aa", "2"));
        let names: Vec<&str> = tagged.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["frame", "face", "body", "text", "aa", "zz"]);
    }

    #[test]
    fn test_bbox_requires_integers() {
        let mut r = region("frame", "x");
        r.attributes.insert("xmin".into(), AttrValue::Integer(1));
        r.attributes.insert("ymin".into(), AttrValue::Integer(2));
        r.attributes.insert("xmax".into(), AttrValue::Integer(11));
        assert!(r.bbox().is_none());

        r.attributes.insert("ymax".into(), AttrValue::Integer(22));
        let bbox = r.bbox().unwrap();
        assert_eq!(bbox.width(), 10);
        assert_eq!(bbox.height(), 20);

        r.attributes
            .insert("ymax".into(), AttrValue::String("022".into()));
        assert!(r.bbox().is_none());
    }

    #[test]
    fn test_output_mode_from_str_loose() {
        assert_eq!(OutputMode::from_str_loose("Flat"), Some(OutputMode::Flat));
        assert_eq!(
            OutputMode::from_str_loose(" tagged "),
            Some(OutputMode::Tagged)
        );
        assert_eq!(OutputMode::from_str_loose("nested"), None);
    }

    fn page(index: i64, regions: PageRegions) -> Page {
        Page {
            index,
            width: 100,
            height: 100,
            attributes: Attributes::new(),
            regions,
        }
    }

    #[test]
    fn test_page_mode_and_region_count() {
        let mut tagged = TaggedRegions::default();
        tagged.push(region("frame", "a"));
        tagged.push(region("balloon", "b"));
        let p = page(0, PageRegions::Tagged(tagged));
        assert_eq!(p.mode(), OutputMode::Tagged);
        assert_eq!(p.region_count(), 2);

        let p = page(
            0,
            PageRegions::Flat {
                contents: vec![region("face", "c")],
            },
        );
        assert_eq!(p.mode(), OutputMode::Flat);
        assert_eq!(p.region_count(), 1);
    }

    #[test]
    fn test_document_page_lookup_uses_index_attribute() {
        let empty = || PageRegions::Flat { contents: vec![] };
        let doc = AnnotationDocument {
            title: "AAA".into(),
            characters: vec![Character {
                id: Some("00000003".into()),
                name: Some("hero".into()),
                attributes: Attributes::new(),
            }],
            pages: vec![page(5, empty()), page(2, empty())],
        };

        assert_eq!(doc.page(2).map(|p| p.index), Some(2));
        assert!(doc.page(1).is_none());
        assert_eq!(
            doc.character("00000003").and_then(|c| c.name.as_deref()),
            Some("hero")
        );
        assert!(doc.character("3").is_none());
    }

    #[test]
    fn test_colliding_names_survive_serialization() {
        let mut clash = region("index", "r1");
        clash
            .attributes
            .insert("kind".into(), AttrValue::String("shout".into()));
        clash
            .attributes
            .insert("text".into(), AttrValue::Integer(7));
        let mut tagged = TaggedRegions::default();
        tagged.push(clash);
        let mut p = page(4, PageRegions::Tagged(tagged));
        p.attributes
            .insert("frame".into(), AttrValue::String("x".into()));

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["index"], 4);
        assert_eq!(json["attributes"]["frame"], "x");
        assert_eq!(json["frame"], serde_json::json!([]));

        let r = &json["extensions"]["index"][0];
        assert_eq!(r["kind"], "index");
        assert_eq!(r["attributes"]["kind"], "shout");
        assert_eq!(r["attributes"]["text"], 7);
        assert!(r.get("text").is_none());
    }

    #[test]
    fn test_attr_value_serializes_untagged() {
        let json = serde_json::to_string(&vec![
            AttrValue::Integer(234),
            AttrValue::String("0007a8be".into()),
        ])
        .unwrap();
        assert_eq!(json, r#"[234,"0007a8be"]"#);
    }
}
