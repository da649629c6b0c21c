use crate::frameworks::MetricScope;

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub path: &'static str,
    pub scope: MetricScope,
}

#[derive(Debug)]
pub struct FrameworkDef {
    pub id: &'static str,
    pub group: &'static str,
    pub composite_path: &'static str,
    pub metrics: &'static [MetricDef],
    pub critical: &'static [(&'static str, &'static str)],
}

const ARISTOTELES_METRICS: &[MetricDef] = &[
    MetricDef {
        name: "logos",
        path: "aristotelian_modes_analysis.logos.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "pathos",
        path: "aristotelian_modes_analysis.pathos.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "ethos",
        path: "aristotelian_modes_analysis.ethos.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "balance",
        path: "rhetorical_balance_analysis.balance_score",
        scope: MetricScope::DetailedOnly,
    },
];

const KOLB_METRICS: &[MetricDef] = &[
    MetricDef {
        name: "concrete_experience",
        path: "kolb_phases_analysis.phase_1_concrete_experience.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "reflective_observation",
        path: "kolb_phases_analysis.phase_2_reflective_observation.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "abstract_conceptualization",
        path: "kolb_phases_analysis.phase_3_abstract_conceptualization.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "active_experimentation",
        path: "kolb_phases_analysis.phase_4_active_experimentation.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "dreamer",
        path: "learning_styles_analysis.dreamer.score",
        scope: MetricScope::DetailedOnly,
    },
    MetricDef {
        name: "thinker",
        path: "learning_styles_analysis.thinker.score",
        scope: MetricScope::DetailedOnly,
    },
    MetricDef {
        name: "doer",
        path: "learning_styles_analysis.doer.score",
        scope: MetricScope::DetailedOnly,
    },
    MetricDef {
        name: "decider",
        path: "learning_styles_analysis.decider.score",
        scope: MetricScope::DetailedOnly,
    },
    // Alternative style key set seen in later scorer prompts.
    MetricDef {
        name: "assimilating",
        path: "learning_styles_analysis.assimilating_style.score",
        scope: MetricScope::DetailedOnly,
    },
    MetricDef {
        name: "converging",
        path: "learning_styles_analysis.converging_style.score",
        scope: MetricScope::DetailedOnly,
    },
    MetricDef {
        name: "accommodating",
        path: "learning_styles_analysis.accommodating_style.score",
        scope: MetricScope::DetailedOnly,
    },
    MetricDef {
        name: "diverging",
        path: "learning_styles_analysis.diverging_style.score",
        scope: MetricScope::DetailedOnly,
    },
    MetricDef {
        name: "cycle_completeness",
        path: "integrality_and_cycle.cycle_completeness.score",
        scope: MetricScope::DetailedOnly,
    },
    MetricDef {
        name: "balance_between_phases",
        path: "integrality_and_cycle.balance_between_phases.score",
        scope: MetricScope::DetailedOnly,
    },
    MetricDef {
        name: "holistic_learning",
        path: "integrality_and_cycle.holistic_learning.score",
        scope: MetricScope::DetailedOnly,
    },
];

const SCHULZ_VON_THUN_METRICS: &[MetricDef] = &[
    MetricDef {
        name: "factual_content",
        path: "schulz_von_thun_analysis.factual_content_blue.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "self_revelation",
        path: "schulz_von_thun_analysis.self_revelation_green.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "relational_aspect",
        path: "schulz_von_thun_analysis.relational_aspect_yellow.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "appeal_aspect",
        path: "schulz_von_thun_analysis.appeal_aspect_red.score",
        scope: MetricScope::Both,
    },
];

const ESTHETIEK_METRICS: &[MetricDef] = &[
    MetricDef {
        name: "poetics",
        path: "domain_a_poetics_of_language.average_score_language",
        scope: MetricScope::SummaryOnly,
    },
    MetricDef {
        name: "dramaturgy",
        path: "domain_b_dramaturgy_of_structure.average_score_structure",
        scope: MetricScope::SummaryOnly,
    },
    MetricDef {
        name: "anti_kitsch",
        path: "kitsch_diagnosis.anti_kitsch_score",
        scope: MetricScope::DetailedOnly,
    },
    MetricDef {
        name: "space_for_grace",
        path: "space_for_grace_analysis.space_score",
        scope: MetricScope::DetailedOnly,
    },
];

const TRANSACTIONAL_METRICS: &[MetricDef] = &[
    MetricDef {
        name: "freedom_critical_parent",
        path: "ego_positions_scan.parent.freedom_from_critical_parent_CP.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "nurturing_parent",
        path: "ego_positions_scan.parent.healthy_care_NP.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "adult",
        path: "ego_positions_scan.adult.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "freedom_adapted_child",
        path: "ego_positions_scan.child.freedom_from_adapted_child_AC.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "free_child",
        path: "ego_positions_scan.child.free_child_FC.score",
        scope: MetricScope::Both,
    },
    MetricDef {
        name: "communicative_purity",
        path: "transaction_analysis.communicative_purity_score",
        scope: MetricScope::Both,
    },
];

const SPEECH_ACT_METRICS: &[MetricDef] = &[MetricDef {
    name: "illocutie_helderheid",
    path: "drievoudige_structuur_analyse.illocutie.helderheid_score",
    scope: MetricScope::Both,
}];

const FRAMEWORKS: &[FrameworkDef] = &[
    FrameworkDef {
        id: "aristoteles",
        group: "rhetorical",
        composite_path: "overall_picture.overall_rhetorical_score",
        metrics: ARISTOTELES_METRICS,
        critical: &[
            ("aristotelian_modes_analysis.logos.score", "logos.score"),
            ("aristotelian_modes_analysis.pathos.score", "pathos.score"),
            ("aristotelian_modes_analysis.ethos.score", "ethos.score"),
            ("overall_picture.overall_rhetorical_score", "overall.score"),
        ],
    },
    FrameworkDef {
        id: "dekker",
        group: "theological",
        composite_path: "overall_dekker_analysis.average_score",
        metrics: &[],
        // Criterion keys vary between scorer runs; completeness checks for at
        // least one criterion score instead of a fixed path.
        critical: &[],
    },
    FrameworkDef {
        id: "kolb",
        group: "pedagogical",
        composite_path: "overall_picture.overall_kolb_score",
        metrics: KOLB_METRICS,
        critical: &[
            (
                "kolb_phases_analysis.phase_1_concrete_experience.score",
                "concrete_experience.score",
            ),
            (
                "kolb_phases_analysis.phase_2_reflective_observation.score",
                "reflective_observation.score",
            ),
            (
                "kolb_phases_analysis.phase_3_abstract_conceptualization.score",
                "abstract_conceptualization.score",
            ),
            (
                "kolb_phases_analysis.phase_4_active_experimentation.score",
                "active_experimentation.score",
            ),
            ("overall_picture.overall_kolb_score", "overall.score"),
        ],
    },
    FrameworkDef {
        id: "schulz_von_thun",
        group: "communication",
        composite_path: "overall_picture.overall_communication_score",
        metrics: SCHULZ_VON_THUN_METRICS,
        critical: &[
            (
                "schulz_von_thun_analysis.factual_content_blue.score",
                "factual_content.score",
            ),
            (
                "schulz_von_thun_analysis.self_revelation_green.score",
                "self_revelation.score",
            ),
            (
                "schulz_von_thun_analysis.relational_aspect_yellow.score",
                "relational_aspect.score",
            ),
            (
                "schulz_von_thun_analysis.appeal_aspect_red.score",
                "appeal_aspect.score",
            ),
            ("overall_picture.overall_communication_score", "overall.score"),
        ],
    },
    FrameworkDef {
        id: "esthetiek",
        group: "aesthetic",
        composite_path: "overall_aesthetics.overall_aesthetic_score",
        metrics: ESTHETIEK_METRICS,
        critical: &[("overall_aesthetics.overall_aesthetic_score", "overall.score")],
    },
    FrameworkDef {
        id: "transactional",
        group: "psychological",
        composite_path: "conclusion_and_recommendation.psychological_health_score",
        metrics: TRANSACTIONAL_METRICS,
        critical: &[(
            "conclusion_and_recommendation.psychological_health_score",
            "overall.score",
        )],
    },
    FrameworkDef {
        id: "metaphor",
        group: "linguistic",
        composite_path: "diagnostische_evaluatie.coherentie_analyse.overall_coherentie",
        metrics: &[],
        critical: &[(
            "diagnostische_evaluatie.coherentie_analyse.overall_coherentie",
            "coherentie.overall",
        )],
    },
    FrameworkDef {
        id: "speech_act",
        group: "performative",
        composite_path: "diagnostische_evaluatie.gebeuren_score",
        metrics: SPEECH_ACT_METRICS,
        critical: &[
            (
                "drievoudige_structuur_analyse.illocutie.helderheid_score",
                "illocutie.helderheid_score",
            ),
            ("diagnostische_evaluatie.gebeuren_score", "diagnose.gebeuren_score"),
        ],
    },
    FrameworkDef {
        id: "narrative",
        group: "narrative",
        composite_path: "diagnostische_evaluatie.narratieve_coherentie.coherentie_score",
        metrics: &[],
        critical: &[(
            "diagnostische_evaluatie.narratieve_coherentie.coherentie_score",
            "coherentie.score",
        )],
    },
];

pub fn frameworks() -> &'static [FrameworkDef] {
    FRAMEWORKS
}

pub fn find_framework(id: &str) -> Option<&'static FrameworkDef> {
    FRAMEWORKS.iter().find(|fw| fw.id == id)
}
