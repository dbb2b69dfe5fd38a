quantity!(
    /// Euros, either a one-off amount or an annual one, depending on the context.
    Euros, via: f64, suffix: "€", precision: 2
);
