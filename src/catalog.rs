use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    SingleSelect,
    MultiSelect,
}

/// One intake question. Defined once, below; declaration order is the
/// traversal order and is never re-sorted.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub part: u8,
    pub title: &'static str,
    pub subtitle: &'static str,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub options: &'static [&'static str],
}

pub static PART_LABELS: &[(u8, &str)] = &[
    (1, "Property Basics"),
    (2, "The Dispute"),
    (3, "Evidence & Proceedings"),
    (4, "Urgency & Goal"),
];

static CATALOG: &[Question] = &[
    Question {
        id: "location",
        part: 1,
        title: "Which state is the property located in?",
        subtitle: "Land records and portals differ from state to state.",
        kind: QuestionKind::SingleSelect,
        options: &[
            "Maharashtra",
            "Karnataka",
            "Uttar Pradesh",
            "Tamil Nadu",
            "Delhi NCR",
            "Another state",
        ],
    },
    Question {
        id: "property_type",
        part: 1,
        title: "What kind of property is it?",
        subtitle: "",
        kind: QuestionKind::SingleSelect,
        options: &[
            "Agricultural land",
            "Residential plot",
            "House or flat",
            "Commercial property",
        ],
    },
    Question {
        id: "possession_status",
        part: 1,
        title: "Who is in possession of the property today?",
        subtitle: "Physical possession matters, independent of the papers.",
        kind: QuestionKind::SingleSelect,
        options: &[
            "I am in possession",
            "The other party is in possession",
            "Possession is disputed or shared",
            "The property is vacant",
        ],
    },
    Question {
        id: "opponent_type",
        part: 2,
        title: "Who is the dispute with?",
        subtitle: "",
        kind: QuestionKind::SingleSelect,
        options: &[
            "Family member or relative",
            "Neighbour",
            "Tenant",
            "Builder or developer",
            "Stranger or land mafia",
            "A government body",
        ],
    },
    Question {
        id: "core_issue",
        part: 2,
        title: "What best describes the core problem?",
        subtitle: "Pick the one closest to your situation.",
        kind: QuestionKind::SingleSelect,
        options: &[
            "Someone has illegally occupied my property",
            "Fake documents were used to transfer it",
            "They are blocking my access road",
            "Boundary or encroachment dispute",
            "My inheritance share is being denied",
        ],
    },
    Question {
        id: "ancestral_status",
        part: 2,
        title: "How did the property come to you?",
        subtitle: "Ancestral and self-acquired property follow different rules.",
        kind: QuestionKind::SingleSelect,
        options: &[
            "Self-acquired by me",
            "Inherited or ancestral",
            "Jointly owned with family",
            "Purchased recently",
        ],
    },
    Question {
        id: "documents_held",
        part: 3,
        title: "Which documents do you currently hold?",
        subtitle: "Select everything that applies.",
        kind: QuestionKind::MultiSelect,
        options: &[
            "Registered sale deed",
            "7/12 extract or RTC",
            "Mutation entry (Ferfar/Khata)",
            "Property tax receipts",
            "Will or succession certificate",
            "None of these",
        ],
    },
    Question {
        id: "police_court_status",
        part: 3,
        title: "Has the matter reached the police or a court?",
        subtitle: "",
        kind: QuestionKind::SingleSelect,
        options: &[
            "No complaint filed yet",
            "Police complaint filed",
            "FIR registered",
            "Case already in court",
        ],
    },
    Question {
        id: "immediate_threat",
        part: 4,
        title: "Is anything happening on the ground right now?",
        subtitle: "This decides how urgently you need an injunction.",
        kind: QuestionKind::SingleSelect,
        options: &[
            "Construction is happening on the land right now",
            "They are trying to sell the property",
            "Threats of violence were made",
            "No immediate threat",
        ],
    },
    Question {
        id: "dispute_start_date",
        part: 4,
        title: "When did the dispute start?",
        subtitle: "Limitation periods can bar old claims.",
        kind: QuestionKind::SingleSelect,
        options: &[
            "Less than 1 year ago",
            "1 to 3 years ago",
            "3 to 12 years ago",
            "More than 12 years ago",
        ],
    },
    Question {
        id: "desired_outcome",
        part: 4,
        title: "What outcome do you want?",
        subtitle: "",
        kind: QuestionKind::SingleSelect,
        options: &[
            "Get my property back",
            "Stop the construction or sale",
            "Get my rightful share",
            "Monetary compensation",
        ],
    },
];

pub fn get(index: usize) -> Option<&'static Question> {
    CATALOG.get(index)
}

pub fn len() -> usize {
    CATALOG.len()
}

pub fn part_label(part: u8) -> &'static str {
    PART_LABELS
        .iter()
        .find(|(p, _)| *p == part)
        .map(|(_, label)| *label)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_eleven_questions_in_declaration_order() {
        assert_eq!(len(), 11);
        assert_eq!(get(0).unwrap().id, "location");
        assert_eq!(get(len() - 1).unwrap().id, "desired_outcome");
        assert!(get(len()).is_none());

        // Parts are contiguous and ascending along the traversal.
        let mut last_part = 0;
        for i in 0..len() {
            let q = get(i).unwrap();
            assert!(q.part >= last_part);
            last_part = q.part;
        }
    }

    #[test]
    fn test_question_ids_are_unique() {
        let ids: HashSet<_> = (0..len()).map(|i| get(i).unwrap().id).collect();
        assert_eq!(ids.len(), len());
    }

    #[test]
    fn test_exactly_one_multi_select() {
        let multis: Vec<_> = (0..len())
            .map(|i| get(i).unwrap())
            .filter(|q| q.kind == QuestionKind::MultiSelect)
            .collect();
        assert_eq!(multis.len(), 1);
        assert_eq!(multis[0].id, "documents_held");
    }

    #[test]
    fn test_every_question_has_options_and_a_part_label() {
        for i in 0..len() {
            let q = get(i).unwrap();
            assert!(!q.options.is_empty(), "{} has no options", q.id);
            assert!((1..=4).contains(&q.part));
            assert!(!part_label(q.part).is_empty());
        }
        assert_eq!(part_label(1), "Property Basics");
        assert_eq!(part_label(9), "");
    }

    #[test]
    fn test_last_question_is_single_select() {
        assert_eq!(get(len() - 1).unwrap().kind, QuestionKind::SingleSelect);
    }
}
