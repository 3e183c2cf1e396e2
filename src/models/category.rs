use serde::Serialize;
use rocket_okapi::okapi::schemars::JsonSchema;

/// A node of the fixed service taxonomy.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
}

/// Group of categories shown together on the browse screen.
#[derive(Debug, Serialize, Clone, Copy, JsonSchema)]
pub struct CategorySection {
    pub title: &'static str,
    #[schemars(with = "Vec<Category>")]
    pub categories: &'static [Category],
}

const fn category(id: &'static str, name: &'static str) -> Category {
    Category { id, name }
}

const HOUSEHOLD: &[Category] = &[
    category("cleaning", "Cleaners"),
    category("gardener", "Gardeners"),
    category("pest-control", "Pest Control"),
    category("coconut-climber", "Coconut Tree Climber"),
    category("painter", "Painters"),
    category("mover", "Movers"),
];

const SPECIALIZED: &[Category] = &[
    category("cctv", "CCTV Surveillance"),
    category("solar", "Solar Installation"),
    category("appliance-repair", "Appliance Repair"),
    category("mechanic", "Mechanics"),
];

const PERSONAL_LIFESTYLE: &[Category] = &[
    category("tailor", "Tailors"),
    category("beautician", "Beauticians"),
    category("hairstylist", "Hair Stylists"),
    category("fitness-trainer", "Fitness Trainers"),
    category("pet-care", "Pet Care"),
    category("babysitter", "Babysitters"),
];

const HEALTHCARE_SUPPORT: &[Category] = &[
    category("doctor", "Doctors"),
    category("nurse", "Nurses"),
    category("physiotherapist", "Physiotherapists"),
    category("lab-technician", "Lab Technicians"),
    category("ambulance", "Ambulance Services"),
    category("personal-support", "Personal Support"),
];

const PROFESSIONAL: &[Category] = &[
    category("call-support", "Call Support"),
    category("driver", "Drivers"),
    category("tutor", "Tutors"),
    category("accountant", "Accountants"),
    category("photographer", "Photographers"),
    category("event-planner", "Event Planners"),
    category("cook", "Cooks"),
    category("security-guard", "Security Guards"),
];

const CONSTRUCTION_INDUSTRIAL: &[Category] = &[
    category("plumber", "Plumbers"),
    category("electrician", "Electricians"),
    category("carpenter", "Carpenters"),
    category("mason", "Masons"),
    category("welder", "Welders"),
    category("machine-operator", "Machine Operators"),
    category("site-helper", "Site Helpers"),
];

const DIGITAL_FREELANCE: &[Category] = &[
    category("graphic-designer", "Graphic Designers"),
    category("web-developer", "Web Developers"),
    category("content-writer", "Content Writers"),
    category("data-entry", "Data Entry"),
];

pub const CATEGORY_SECTIONS: &[CategorySection] = &[
    CategorySection { title: "🏡 Household & Maintenance", categories: HOUSEHOLD },
    CategorySection { title: "⚡ Specialized Services", categories: SPECIALIZED },
    CategorySection { title: "🏗️ Construction & Industrial", categories: CONSTRUCTION_INDUSTRIAL },
    CategorySection { title: "🏥 Healthcare & Support", categories: HEALTHCARE_SUPPORT },
    CategorySection { title: "💇 Personal & Lifestyle", categories: PERSONAL_LIFESTYLE },
    CategorySection { title: "💼 Professional Services", categories: PROFESSIONAL },
    CategorySection { title: "💻 Digital & Freelance", categories: DIGITAL_FREELANCE },
];

pub fn all_categories() -> impl Iterator<Item = &'static Category> {
    CATEGORY_SECTIONS.iter().flat_map(|section| section.categories.iter())
}

pub fn find_category(id: &str) -> Option<&'static Category> {
    all_categories().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn category_ids_are_unique() {
        let ids: Vec<_> = all_categories().map(|c| c.id).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
        assert_eq!(ids.len(), 41);
    }

    #[test]
    fn finds_by_id() {
        assert_eq!(find_category("plumber").map(|c| c.name), Some("Plumbers"));
        assert!(find_category("astronaut").is_none());
    }
}
