//! Built-in HSN table for common retail goods

use crate::types::{GstRate, HsnCodeEntry};

/// Retail HSN codes with their slabs, in registration order
///
/// 3401 appears twice (soap, toothpaste); the first entry wins on lookup.
pub fn builtin_entries() -> Vec<HsnCodeEntry> {
    use GstRate::*;

    vec![
        HsnCodeEntry::new("0401", "Milk", Zero, "04", "I")
            .with_keywords(["doodh", "dairy", "toned", "cream"]),
        HsnCodeEntry::new("0405", "Butter and ghee", Twelve, "04", "I")
            .with_keywords(["makhan", "ghee"]),
        HsnCodeEntry::new("0406", "Cheese and paneer", Twelve, "04", "I")
            .with_keywords(["paneer"]),
        HsnCodeEntry::new("0407", "Eggs", Zero, "04", "I").with_keywords(["anda", "egg"]),
        HsnCodeEntry::new("0701", "Potatoes", Zero, "07", "II").with_keywords(["aloo", "potato"]),
        HsnCodeEntry::new("0713", "Dried pulses", Zero, "07", "II")
            .with_keywords(["dal", "dhal", "lentil", "chana", "moong", "toor"]),
        HsnCodeEntry::new("0901", "Coffee", Five, "09", "II").with_keywords(["filter"]),
        HsnCodeEntry::new("0902", "Tea", Five, "09", "II").with_keywords(["chai", "chaipatti"]),
        HsnCodeEntry::new("0910", "Spices", Five, "09", "II")
            .with_keywords(["masala", "haldi", "turmeric", "jeera", "chilli"]),
        HsnCodeEntry::new("1001", "Wheat", Zero, "10", "II").with_keywords(["gehun"]),
        HsnCodeEntry::new("1006", "Rice", Five, "10", "II")
            .with_keywords(["chawal", "basmati"]),
        HsnCodeEntry::new("1101", "Wheat flour", Five, "11", "II")
            .with_keywords(["atta", "maida"]),
        HsnCodeEntry::new("1507", "Soyabean oil", Five, "15", "III")
            .with_keywords(["cooking", "refined", "tel"]),
        HsnCodeEntry::new("1701", "Sugar", Five, "17", "IV")
            .with_keywords(["cheeni", "shakkar"]),
        HsnCodeEntry::new("1704", "Sugar confectionery", Eighteen, "17", "IV")
            .with_keywords(["candy", "toffee", "sweets"]),
        HsnCodeEntry::new("1806", "Chocolate", Eighteen, "18", "IV")
            .with_keywords(["cocoa"]),
        HsnCodeEntry::new("1905", "Biscuits and bread", Eighteen, "19", "IV")
            .with_keywords(["biscuit", "cookies", "rusk", "cake"]),
        HsnCodeEntry::new("2106", "Namkeen and food preparations", Twelve, "21", "IV")
            .with_keywords(["bhujia", "mixture", "snacks"]),
        HsnCodeEntry::new("2201", "Mineral water", Eighteen, "22", "IV")
            .with_keywords(["bisleri", "bottled"]),
        HsnCodeEntry::new("2202", "Soft drinks and aerated beverages", TwentyEight, "22", "IV")
            .with_keywords(["cola", "soda", "pepsi", "coke", "drink"]),
        HsnCodeEntry::new("2402", "Cigarettes", TwentyEight, "24", "IV")
            .with_keywords(["cigarette", "tobacco"]),
        HsnCodeEntry::new("3004", "Medicines", Twelve, "30", "VI")
            .with_keywords(["tablet", "syrup", "capsule", "medicine"]),
        HsnCodeEntry::new("3305", "Shampoo and hair oil", Eighteen, "33", "VI")
            .with_keywords(["hair", "conditioner"]),
        HsnCodeEntry::new("3401", "Soap", Eighteen, "34", "VI")
            .with_keywords(["sabun", "bath", "handwash"]),
        HsnCodeEntry::new("3401", "Toothpaste", Eighteen, "34", "VI")
            .with_keywords(["dental", "paste", "colgate"]),
        HsnCodeEntry::new("3402", "Detergent", Eighteen, "34", "VI")
            .with_keywords(["washing", "powder", "surf"]),
        HsnCodeEntry::new("4820", "Notebooks and registers", Twelve, "48", "X")
            .with_keywords(["notebook", "copy", "diary"]),
        HsnCodeEntry::new("6109", "T-shirts", Five, "61", "XI")
            .with_keywords(["tshirt", "vest", "banian"]),
        HsnCodeEntry::new("6403", "Footwear", Eighteen, "64", "XII")
            .with_keywords(["shoes", "chappal", "sandal"]),
        HsnCodeEntry::new("8471", "Computers and laptops", Eighteen, "84", "XVI")
            .with_keywords(["laptop", "computer", "pc", "desktop"]),
        HsnCodeEntry::new("8516", "Electric heaters and irons", Eighteen, "85", "XVI")
            .with_keywords(["geyser", "iron", "heater", "kettle"]),
        HsnCodeEntry::new("8517", "Mobile phones", Eighteen, "85", "XVI")
            .with_keywords(["phone", "smartphone", "mobile", "cellphone"]),
        HsnCodeEntry::new("8703", "Motor cars", TwentyEight, "87", "XVII")
            .with_keywords(["car", "vehicle"]),
        HsnCodeEntry::new("9403", "Furniture", Eighteen, "94", "XX")
            .with_keywords(["table", "chair", "almirah", "sofa"]),
    ]
}
