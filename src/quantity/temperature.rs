quantity!(Celsius, via: f64, suffix: "°C", precision: 0);
