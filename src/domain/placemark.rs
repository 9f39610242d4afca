use crate::domain::Coordinate;

#[derive(Clone, Default, Debug, PartialEq)]
pub struct Placemark {
    pub thoroughfare: Option<String>,
    pub sub_thoroughfare: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub coordinate: Coordinate,
}
