use std::{
    cmp::Reverse,
    fmt::{Debug, Display, Formatter},
    fs,
    path::Path,
};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{prelude::*, quantity::power::Kilowatts};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Refrigerant {
    /// Propane, the preferred natural refrigerant.
    R290,

    R32,
}

impl Display for Refrigerant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::R290 => write!(f, "R290"),
            Self::R32 => write!(f, "R32"),
        }
    }
}

/// Selling point key, translated by whoever renders it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SellingPoint {
    Efficiency,
    Quiet,
    Eco,
    Ehpa,
}

impl Display for SellingPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Efficiency => write!(f, "high efficiency"),
            Self::Quiet => write!(f, "quiet"),
            Self::Eco => write!(f, "natural refrigerant"),
            Self::Ehpa => write!(f, "EHPA certified"),
        }
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "kebab-case")]
pub struct Product {
    #[builder(into)]
    pub id: String,

    #[builder(into)]
    pub name: String,

    /// Rated heating power.
    pub power: Kilowatts,

    pub refrigerant: Refrigerant,

    #[builder(into)]
    pub image_url: Option<String>,

    #[builder(into)]
    pub product_url: Option<String>,

    #[serde(default)]
    #[builder(default)]
    pub selling_points: Vec<SellingPoint>,
}

/// Heat pumps on offer, in their presentation order.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, rename = "product")]
    pub products: Vec<Product>,
}

impl Default for Catalog {
    fn default() -> Self {
        const SHOP: &str = "https://www.westech.shop";
        const IMAGES: &str = "https://www.westech.shop/media/image";

        use SellingPoint::{Eco, Efficiency, Ehpa, Quiet};

        Self {
            products: vec![
                Product::builder()
                    .id("chofu-4kw-r290")
                    .name("CHOFU 4kW R290 Wärmepumpen Komplettpaket")
                    .power(Kilowatts(4.0))
                    .refrigerant(Refrigerant::R290)
                    .image_url(format!(
                        "{IMAGES}/a4/09/b3/heizkraft_compact2_300l_R290_freisteller_links_vorne_600x600.png"
                    ))
                    .product_url(format!(
                        "{SHOP}/chofu-4kw-r290-waermepumpen-komplettpaket-heizkraft-compact2-wp1-300l"
                    ))
                    .selling_points(vec![Efficiency, Eco, Ehpa])
                    .build(),
                Product::builder()
                    .id("chofu-6kw-r290")
                    .name("CHOFU AEYC-0649ZU-CH1 6kW R290 Luft-Wasser Wärmepumpe")
                    .power(Kilowatts(6.0))
                    .refrigerant(Refrigerant::R290)
                    .image_url(format!("{IMAGES}/a0/a2/29/AEYC-0649_links_vorne_freisteller.png"))
                    .product_url(format!(
                        "{SHOP}/chofu-aeyc-0649zu-ch1-6kw-r290-luft-wasser-waermepumpe"
                    ))
                    .selling_points(vec![Efficiency, Quiet, Eco, Ehpa])
                    .build(),
                Product::builder()
                    .id("chofu-10kw-r290")
                    .name("CHOFU AEYC-1049ZU-CH1 10kW R290 Luft-Wasser Wärmepumpe")
                    .power(Kilowatts(10.0))
                    .refrigerant(Refrigerant::R290)
                    .image_url(format!("{IMAGES}/f1/e5/22/AEYC-1049_links_vorne_freisteller.png"))
                    .product_url(format!(
                        "{SHOP}/chofu-aeyc-1049zu-ch1-10kw-r290-luft-wasser-waermepumpe"
                    ))
                    .selling_points(vec![Efficiency, Quiet, Eco, Ehpa])
                    .build(),
                Product::builder()
                    .id("chofu-6kw-r32")
                    .name("CHOFU 6kW Inverter Wärmepumpe R32")
                    .power(Kilowatts(6.0))
                    .refrigerant(Refrigerant::R32)
                    .image_url(format!("{IMAGES}/1f/92/7f/wh_6kw_freisteller_links_vorne.png"))
                    .product_url(format!("{SHOP}/6kw-chofu-inverter-waermepumpe"))
                    .selling_points(vec![Efficiency, Ehpa])
                    .build(),
                Product::builder()
                    .id("chofu-10kw-r32")
                    .name("CHOFU 10kW Inverter Wärmepumpe R32")
                    .power(Kilowatts(10.0))
                    .refrigerant(Refrigerant::R32)
                    .image_url(format!("{IMAGES}/51/9a/54/wh_10kw_freisteller_links_vorne.png"))
                    .product_url(format!("{SHOP}/10kw-chofu-inverter-waermepumpe"))
                    .selling_points(vec![Efficiency, Ehpa])
                    .build(),
                Product::builder()
                    .id("chofu-12kw-r32")
                    .name("CHOFU 12kW Inverter Wärmepumpe R32")
                    .power(Kilowatts(12.0))
                    .refrigerant(Refrigerant::R32)
                    .image_url(format!("{IMAGES}/22/e1/98/wh_12kw_freisteller_links_vorne.png"))
                    .product_url(format!("{SHOP}/12kw-chofu-inverter-waermepumpe"))
                    .selling_points(vec![Efficiency, Ehpa])
                    .build(),
                Product::builder()
                    .id("chofu-16kw-r32")
                    .name("CHOFU 16kW Inverter Wärmepumpe R32 380V")
                    .power(Kilowatts(16.0))
                    .refrigerant(Refrigerant::R32)
                    .image_url(format!("{IMAGES}/b8/b8/1d/wh_16kw_freisteller_links_vorne.png"))
                    .product_url(format!("{SHOP}/16kw-chofu-inverter-waermepumpe-380v"))
                    .selling_points(vec![Efficiency, Ehpa])
                    .build(),
            ],
        }
    }
}

impl Catalog {
    #[instrument(name = "reading the catalog…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let catalog: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        for product in &catalog.products {
            ensure!(
                product.power.is_finite() && product.power > Kilowatts::ZERO,
                "`{}` must have a positive power, got {}",
                product.id,
                product.power,
            );
        }
        Ok(catalog)
    }

    /// Recommend a heat pump for the required power.
    ///
    /// The smallest sufficient R290 unit wins, then the smallest sufficient R32 one.
    /// When nothing is powerful enough, the most powerful unit is the best there is.
    /// Ties go to the unit listed first.
    #[must_use]
    pub fn select(&self, required: Kilowatts) -> Option<&Product> {
        let smallest_sufficient = |refrigerant: Refrigerant| {
            self.products
                .iter()
                .filter(|product| product.refrigerant == refrigerant && product.power >= required)
                .min_by_key(|product| product.power)
        };
        let selected = smallest_sufficient(Refrigerant::R290)
            .or_else(|| smallest_sufficient(Refrigerant::R32))
            .or_else(|| self.products.iter().min_by_key(|product| Reverse(product.power)));
        debug!(?required, selected = ?selected.map(|product| &product.id));
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, power: f64, refrigerant: Refrigerant) -> Product {
        Product::builder().id(id).name(id).power(Kilowatts(power)).refrigerant(refrigerant).build()
    }

    #[test]
    fn test_prefers_smallest_sufficient_r290() {
        let catalog = Catalog {
            products: vec![
                product("r290-4", 4.0, Refrigerant::R290),
                product("r32-6", 6.0, Refrigerant::R32),
                product("r290-6", 6.0, Refrigerant::R290),
            ],
        };
        assert_eq!(catalog.select(Kilowatts(5.5)).map(|product| product.id.as_str()), Some("r290-6"));
    }

    #[test]
    fn test_falls_back_to_r32() {
        let catalog = Catalog::default();
        let selected = catalog.select(Kilowatts(11.0)).map(|product| product.id.as_str());
        assert_eq!(selected, Some("chofu-12kw-r32"));
    }

    #[test]
    fn test_exact_power_is_sufficient() {
        let catalog = Catalog::default();
        let selected = catalog.select(Kilowatts(10.0)).map(|product| product.id.as_str());
        assert_eq!(selected, Some("chofu-10kw-r290"));
    }

    #[test]
    fn test_falls_back_to_most_powerful() {
        let catalog = Catalog::default();
        let selected = catalog.select(Kilowatts(20.0)).map(|product| product.id.as_str());
        assert_eq!(selected, Some("chofu-16kw-r32"));
    }

    #[test]
    fn test_ties_go_to_first_listed() {
        let catalog = Catalog {
            products: vec![
                product("first", 8.0, Refrigerant::R32),
                product("second", 8.0, Refrigerant::R32),
            ],
        };
        assert_eq!(catalog.select(Kilowatts(7.0)).map(|product| product.id.as_str()), Some("first"));
        assert_eq!(catalog.select(Kilowatts(9.0)).map(|product| product.id.as_str()), Some("first"));
    }

    #[test]
    fn test_empty_catalog() {
        assert!(Catalog { products: Vec::new() }.select(Kilowatts(1.0)).is_none());
    }

    #[test]
    fn test_selection_is_deterministic() {
        let catalog = Catalog::default();
        for required in [0.5, 4.125, 5.5, 6.0, 12.1, 16.0, 40.0] {
            assert_eq!(catalog.select(Kilowatts(required)), catalog.select(Kilowatts(required)));
        }
    }

    #[test]
    fn test_parse_catalog() -> Result {
        // language=toml
        let catalog: Catalog = toml::from_str(
            r#"
                [[product]]
                id = "test-8kw"
                name = "Test 8 kW"
                power = 8.0
                refrigerant = "R290"
                selling-points = ["quiet", "eco"]
            "#,
        )?;
        assert_eq!(catalog.products.len(), 1);
        assert_eq!(catalog.products[0].power, Kilowatts(8.0));
        assert_eq!(catalog.products[0].selling_points, [SellingPoint::Quiet, SellingPoint::Eco]);
        assert_eq!(catalog.products[0].product_url, None);
        Ok(())
    }
}
