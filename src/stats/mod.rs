pub mod describe;
pub mod icc;
pub mod kmedoids;
pub mod pearson;
pub mod quantile;
pub mod resample;
pub mod silhouette;
