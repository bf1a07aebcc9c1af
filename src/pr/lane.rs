//! Mirrors `lane/{offset,lane_section,width,road_mark,lane_link,access,speed}.rs`: lane
//! topology is a lane-offset polynomial plus an ordered list of lane sections, each with
//! left/center/right lanes.

use uom::si::f64::Length;

/// `<laneOffset>`: shifts the whole lane model relative to the reference line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneOffsetRecord {
    pub s: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneSide {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaneType {
    #[default]
    Driving,
    Exit,
    Entry,
    OnRamp,
    OffRamp,
    Sidewalk,
    Walking,
    Biking,
    Rail,
    Tram,
    Parking,
    Shoulder,
    Border,
    Restricted,
    Median,
    Other,
}

/// `<width>` or `<border>`: `w(ds) = a + b*ds + c*ds^2 + d*ds^3`, `ds` local to `s_offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Width {
    pub s_offset: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

/// `<height>`: vertical offset of the lane's inner/outer edges relative to the road
/// reference line, as a cubic in `ds`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightRecord {
    pub s_offset: f64,
    pub inner: Length,
    pub outer: Length,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoadMarkType {
    #[default]
    None,
    Solid,
    Broken,
    SolidSolid,
    SolidBroken,
    BrokenSolid,
    BrokenBroken,
    BottsDots,
    Grass,
    Curb,
    Custom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadMark {
    pub s_offset: f64,
    pub mark_type: RoadMarkType,
    pub weight: Option<String>,
    pub color: Option<String>,
    pub width: Option<Length>,
    pub lane_change: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelDirection {
    Same,
    Opposite,
    Undirected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccessRecord {
    pub s_offset: f64,
    pub restriction: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRecord {
    pub s_offset: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LaneLink {
    pub predecessor: Option<i64>,
    pub successor: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub id: i64,
    pub side: LaneSide,
    pub lane_type: LaneType,
    pub level: bool,
    pub link: LaneLink,
    pub width: Vec<Width>,
    pub height: Vec<HeightRecord>,
    pub road_mark: Vec<RoadMark>,
    pub access: Vec<AccessRecord>,
    pub speed: Vec<SpeedRecord>,
}

impl Lane {
    pub fn new_center(id: i64) -> Self {
        Self {
            id,
            side: LaneSide::Center,
            lane_type: LaneType::Driving,
            level: false,
            link: LaneLink::default(),
            width: Vec::new(),
            height: Vec::new(),
            road_mark: Vec::new(),
            access: Vec::new(),
            speed: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaneSection {
    pub s: f64,
    pub single_side: bool,
    pub left: Vec<Lane>,
    pub center: Vec<Lane>,
    pub right: Vec<Lane>,
}

impl LaneSection {
    /// All lanes, left-to-right by descending then ascending id, center last.
    pub fn all_lanes(&self) -> impl Iterator<Item = &Lane> {
        self.left.iter().chain(self.right.iter()).chain(self.center.iter())
    }

    pub fn lane(&self, id: i64) -> Option<&Lane> {
        self.all_lanes().find(|l| l.id == id)
    }

    pub fn all_lanes_mut(&mut self) -> impl Iterator<Item = &mut Lane> {
        self.left.iter_mut().chain(self.right.iter_mut()).chain(self.center.iter_mut())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lanes {
    pub lane_offset: Vec<LaneOffsetRecord>,
    pub lane_section: Vec<LaneSection>,
}
