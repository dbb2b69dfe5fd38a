quantity!(Hours, via: f64, suffix: "h", precision: 0);
quantity!(Years, via: f64, suffix: "years", precision: 1);
