//! Canned care advice keyed by symptom.
//!
//! A fixed table: each entry lists what to watch for, what to do right away
//! and when a vet visit is needed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advice {
    pub issue: &'static str,
    pub title: &'static str,
    pub symptoms: &'static [&'static str],
    pub immediate_actions: &'static [&'static str],
    pub veterinary_care: &'static [&'static str],
}

pub const DISCLAIMER: &str = "This advice is for informational purposes only and should not replace \
professional veterinary consultation. When in doubt, always consult with your veterinarian.";

static ADVICE_TABLE: [Advice; 5] = [
    Advice {
        issue: "vomiting",
        title: "Vomiting",
        symptoms: &[
            "Loss of appetite",
            "Lethargy",
            "Dehydration",
            "Multiple episodes of vomiting",
        ],
        immediate_actions: &[
            "Withhold food for 12 hours but ensure access to water",
            "Monitor frequency of vomiting",
            "Check for dehydration signs (dry gums, lethargy)",
            "Look for blood in vomit or unusual colors",
        ],
        veterinary_care: &[
            "Vomiting persists for more than 24 hours",
            "Blood in vomit",
            "Severe lethargy or weakness",
            "Signs of dehydration",
            "Known ingestion of toxic substances or foreign objects",
        ],
    },
    Advice {
        issue: "diarrhea",
        title: "Diarrhea",
        symptoms: &[
            "Loose or watery stools",
            "Increased frequency of bowel movements",
            "Urgency to defecate",
            "Possible stomach upset or pain",
        ],
        immediate_actions: &[
            "Ensure constant access to fresh water",
            "Temporarily switch to a bland diet (rice and boiled chicken)",
            "Monitor frequency and consistency",
            "Keep your pet clean and comfortable",
        ],
        veterinary_care: &[
            "Diarrhea persists for more than 48 hours",
            "Blood in stool",
            "Severe lethargy",
            "Signs of dehydration",
            "Fever or vomiting accompanies diarrhea",
        ],
    },
    Advice {
        issue: "lethargy",
        title: "Lethargy",
        symptoms: &[
            "Decreased energy levels",
            "Reluctance to play or exercise",
            "Sleeping more than usual",
            "Reduced interest in daily activities",
        ],
        immediate_actions: &[
            "Monitor food and water intake",
            "Check for other symptoms",
            "Ensure comfortable rest area",
            "Monitor body temperature if possible",
        ],
        veterinary_care: &[
            "Lethargy persists for more than 24 hours",
            "Accompanied by other symptoms",
            "Complete loss of appetite",
            "Difficulty breathing",
            "Unusual behavior changes",
        ],
    },
    Advice {
        issue: "loss-of-appetite",
        title: "Loss of Appetite",
        symptoms: &[
            "Refusing food",
            "Eating less than usual",
            "Weight loss",
            "Possible changes in behavior",
        ],
        immediate_actions: &[
            "Offer different food options",
            "Check for dental issues",
            "Monitor water intake",
            "Keep track of when appetite changed",
        ],
        veterinary_care: &[
            "Not eating for more than 24 hours",
            "Rapid weight loss",
            "Accompanied by vomiting or diarrhea",
            "Signs of pain or distress",
            "Difficulty swallowing",
        ],
    },
    Advice {
        issue: "excessive-thirst",
        title: "Excessive Thirst",
        symptoms: &[
            "Drinking more water than usual",
            "Frequent urination",
            "Possible accidents in the house",
            "Changes in urine color or smell",
        ],
        immediate_actions: &[
            "Ensure clean, fresh water is always available",
            "Monitor daily water intake if possible",
            "Watch for changes in urination",
            "Note any other behavioral changes",
        ],
        veterinary_care: &[
            "Sudden increase in thirst",
            "Accompanied by lethargy or appetite changes",
            "Changes in urination patterns",
            "Signs of dehydration despite drinking",
            "Other unusual symptoms",
        ],
    },
];

/// Advice for an issue key such as `"loss-of-appetite"`
pub fn lookup(issue: &str) -> Option<&'static Advice> {
    ADVICE_TABLE.iter().find(|advice| advice.issue == issue)
}

/// All issue keys, in table order
pub fn issues() -> impl Iterator<Item = &'static str> {
    ADVICE_TABLE.iter().map(|advice| advice.issue)
}
