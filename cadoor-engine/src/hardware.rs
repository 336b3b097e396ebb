//! 按门类型估算五金配件。

use serde::{Deserialize, Serialize};

use crate::candidate::DoorType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HardwareKind {
    Hinge,
    Knob,
    Lever,
    Handle,
    Lock,
    Deadbolt,
    Closer,
    PanicBar,
    Astragal,
    Threshold,
    Weatherstrip,
    DoorStop,
    Other,
}

/// 单扇门所需的一项配件。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareItem {
    pub kind: HardwareKind,
    pub quantity: u32,
    pub product_name: &'static str,
    pub brand: Option<&'static str>,
    pub specifications: Option<&'static str>,
}

impl HardwareItem {
    const fn new(kind: HardwareKind, quantity: u32, product_name: &'static str) -> Self {
        Self {
            kind,
            quantity,
            product_name,
            brand: None,
            specifications: None,
        }
    }

    const fn branded(kind: HardwareKind, quantity: u32, product_name: &'static str, brand: &'static str) -> Self {
        Self {
            kind,
            quantity,
            product_name,
            brand: Some(brand),
            specifications: None,
        }
    }
}

use HardwareKind::*;

const INTERIOR_SINGLE_KIT: [HardwareItem; 3] = [
    HardwareItem::new(Hinge, 3, "Bisagra Estándar 3.5\""),
    HardwareItem::new(Knob, 1, "Pomo Interior"),
    HardwareItem::new(DoorStop, 1, "Tope de Puerta"),
];

const INTERIOR_DOUBLE_KIT: [HardwareItem; 4] = [
    HardwareItem::new(Hinge, 6, "Bisagra Estándar 3.5\""),
    HardwareItem::new(Knob, 2, "Pomo Interior"),
    HardwareItem::new(Astragal, 1, "Astragal para Puerta Doble"),
    HardwareItem::new(DoorStop, 2, "Tope de Puerta"),
];

const EXTERIOR_SINGLE_KIT: [HardwareItem; 6] = [
    HardwareItem::branded(Hinge, 3, "Bisagra Exterior Reforzada 4\"", "Schlage"),
    HardwareItem::branded(Deadbolt, 1, "Cerrojo de Alta Seguridad", "Schlage"),
    HardwareItem::branded(Lever, 1, "Manija Exterior", "Schlage"),
    HardwareItem::new(Threshold, 1, "Umbral de Aluminio"),
    HardwareItem::new(Weatherstrip, 1, "Burlete Completo"),
    HardwareItem::new(DoorStop, 1, "Tope de Puerta"),
];

const FIRE_RATED_KIT: [HardwareItem; 6] = [
    HardwareItem::branded(Hinge, 3, "Bisagra Cortafuego Certificada", "Steelcraft"),
    HardwareItem::branded(Lock, 1, "Cerradura Cortafuego", "Schlage"),
    HardwareItem::new(Closer, 1, "Cierra-puertas Hidráulico"),
    HardwareItem::branded(PanicBar, 1, "Barra Anti-pánico", "Schlage"),
    HardwareItem::new(Threshold, 1, "Umbral Intumescente"),
    HardwareItem::new(Weatherstrip, 1, "Sello Intumescente"),
];

const SLIDING_KIT: [HardwareItem; 3] = [
    HardwareItem::new(Handle, 2, "Manija para Corredera"),
    HardwareItem::new(Lock, 1, "Cerradura para Corredera"),
    HardwareItem {
        kind: Other,
        quantity: 1,
        product_name: "Riel y Rodamientos",
        brand: None,
        specifications: Some("Sistema completo de corredera"),
    },
];

const GENERIC_KIT: [HardwareItem; 3] = [
    HardwareItem::new(Hinge, 3, "Bisagra Estándar"),
    HardwareItem::new(Lock, 1, "Cerradura Estándar"),
    HardwareItem::new(DoorStop, 1, "Tope de Puerta"),
];

/// 单扇门的配件清单。没有专用清单的类型（折叠门）使用通用清单。
pub fn hardware_for(door_type: DoorType) -> &'static [HardwareItem] {
    match door_type {
        DoorType::InteriorSingle => &INTERIOR_SINGLE_KIT,
        DoorType::InteriorDouble => &INTERIOR_DOUBLE_KIT,
        DoorType::ExteriorSingle => &EXTERIOR_SINGLE_KIT,
        DoorType::FireRated60Min => &FIRE_RATED_KIT,
        DoorType::Sliding => &SLIDING_KIT,
        DoorType::Bifold => &GENERIC_KIT,
    }
}

/// 汇总后的一行配件需求。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareLine {
    pub item_type: HardwareKind,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<String>,
    pub quantity: u32,
}

/// 按（配件类型, 产品）累加数量，保持首次出现的顺序。
pub fn summarize_hardware<I>(door_types: I) -> Vec<HardwareLine>
where
    I: IntoIterator<Item = DoorType>,
{
    let mut lines: Vec<HardwareLine> = Vec::new();
    for door_type in door_types {
        for item in hardware_for(door_type) {
            match lines
                .iter_mut()
                .find(|line| line.item_type == item.kind && line.product_name == item.product_name)
            {
                Some(line) => line.quantity += item.quantity,
                None => lines.push(HardwareLine {
                    item_type: item.kind,
                    product_name: item.product_name.to_string(),
                    brand: item.brand.map(str::to_string),
                    specifications: item.specifications.map(str::to_string),
                    quantity: item.quantity,
                }),
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_door_type_has_a_kit() {
        for door_type in DoorType::ALL {
            assert!(!hardware_for(door_type).is_empty(), "{door_type} 缺少配件");
        }
        assert_eq!(hardware_for(DoorType::Bifold), &GENERIC_KIT);
    }

    #[test]
    fn fire_rated_kit_includes_closer_and_panic_bar() {
        let kinds: Vec<_> = hardware_for(DoorType::FireRated60Min)
            .iter()
            .map(|item| item.kind)
            .collect();
        assert!(kinds.contains(&Closer));
        assert!(kinds.contains(&PanicBar));
    }

    #[test]
    fn summary_aggregates_in_first_seen_order() {
        let lines = summarize_hardware([
            DoorType::InteriorSingle,
            DoorType::InteriorDouble,
            DoorType::InteriorSingle,
        ]);

        let hinge = &lines[0];
        assert_eq!(hinge.item_type, Hinge);
        assert_eq!(hinge.product_name, "Bisagra Estándar 3.5\"");
        assert_eq!(hinge.quantity, 3 + 6 + 3);

        let stops = lines
            .iter()
            .find(|line| line.item_type == DoorStop)
            .expect("door stop line");
        assert_eq!(stops.quantity, 1 + 2 + 1);
        assert_eq!(lines.last().map(|line| line.item_type), Some(Astragal));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn same_kind_with_different_product_stays_separate() {
        let lines = summarize_hardware([DoorType::InteriorSingle, DoorType::Bifold]);
        let hinges: Vec<_> = lines.iter().filter(|line| line.item_type == Hinge).collect();
        assert_eq!(hinges.len(), 2);
    }

    #[test]
    fn summary_serializes_with_camel_case_keys() {
        let lines = summarize_hardware([DoorType::Sliding]);
        let json = serde_json::to_value(&lines).expect("serialize hardware");
        assert_eq!(json[0]["itemType"], "HANDLE");
        assert_eq!(json[0]["quantity"], 2);
        assert!(json[0].get("brand").is_none());
        assert_eq!(json[2]["itemType"], "OTHER");
        assert_eq!(json[2]["specifications"], "Sistema completo de corredera");
        assert!(summarize_hardware(std::iter::empty()).is_empty());
    }
}
