mod geodesic;
mod haversine;
mod linspace;

pub(crate) use {geodesic::GeodesicIter, haversine::HaversineIter, linspace::linspace};
