//! Localized string lookup for report labels.
//!
//! `gettext` is total over the known key set; an unknown key echoes back
//! unchanged, which keeps missing translations visible in the output instead
//! of crashing generation. Workbook conditional formats and synthesis
//! formulas match on these exact strings, so every label must come from
//! here and nowhere else.

use clap::ValueEnum;

/// Report language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Lang {
    En,
    Fr,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fr => "fr",
        }
    }
}

/// Localized label source for both generators.
#[derive(Debug, Clone, Copy)]
pub struct Locale {
    lang: Lang,
}

impl Locale {
    pub fn new(lang: Lang) -> Self {
        Locale { lang }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Look up a label. Unknown keys are returned as-is.
    pub fn gettext<'a>(&self, key: &'a str) -> &'a str {
        let translated = match self.lang {
            Lang::En => en(key),
            Lang::Fr => fr(key),
        };
        translated.unwrap_or(key)
    }
}

fn en(key: &str) -> Option<&'static str> {
    Some(match key {
        "minimal" => "Minimal",
        "intermediary" => "Intermediary",
        "enhanced" => "Enhanced",
        "high" => "High",
        "success" => "Success",
        "failed" => "Failed",
        "na" => "N/A",
        "severity_low" => "Low",
        "severity_medium" => "Medium",
        "severity_high" => "High",
        "severity_critical" => "Critical",
        "information" => "Information",
        "summary" => "Summary",
        "categories" => "Categories",
        "level" => "Level",
        "rule" => "Rule",
        "result" => "Result",
        "information_header_title" => "Compliance audit results",
        "data_classification" => "Data classification",
        "classification_level" => "Classification level",
        "general_information" => "General information",
        "date_of_completion" => "Date of completion",
        "used_baseline" => "Baseline used",
        "tool_version" => "Tool version",
        "online_tool_version" => "Tool repository",
        "audited_equipment" => "Audited equipment",
        "audited_asset" => "Audited asset",
        "compliance_chart_title" => "Compliance coverage",
        "levels" => "Levels",
        "nb_checks" => "Number of checks",
        "compliance_report_title" => "Compliance audit report",
        "participants" => "Participants",
        "role" => "Role",
        "contact_information" => "Contact information",
        "auditee" => "Auditee",
        "project_management" => "Project management",
        "authors" => "Authors",
        "modification_history" => "Modification history",
        "author" => "Author",
        "report_writing" => "Report writing",
        "nc_summary_title" => "Summary of non-conformities",
        "rule_name" => "Rule",
        "rule_level" => "Level",
        "rule_severity" => "Severity",
        "see_also" => "See also:",
        "check_command" => "Check command",
        "expected_result" => "Expected result",
        "terminal_output" => "Observed output",
        _ => return None,
    })
}

fn fr(key: &str) -> Option<&'static str> {
    Some(match key {
        "minimal" => "Minimal",
        "intermediary" => "Intermédiaire",
        "enhanced" => "Renforcé",
        "high" => "Élevé",
        "success" => "Succès",
        "failed" => "Échec",
        "na" => "N/A",
        "severity_low" => "Faible",
        "severity_medium" => "Moyenne",
        "severity_high" => "Élevée",
        "severity_critical" => "Critique",
        "information" => "Informations",
        "summary" => "Synthèse",
        "categories" => "Catégories",
        "level" => "Niveau",
        "rule" => "Règle",
        "result" => "Résultat",
        "information_header_title" => "Résultats de l'audit de conformité",
        "data_classification" => "Classification des données",
        "classification_level" => "Niveau de classification",
        "general_information" => "Informations générales",
        "date_of_completion" => "Date de réalisation",
        "used_baseline" => "Référentiel utilisé",
        "tool_version" => "Version de l'outil",
        "online_tool_version" => "Dépôt de l'outil",
        "audited_equipment" => "Équipement audité",
        "audited_asset" => "Actif audité",
        "compliance_chart_title" => "Couverture de conformité",
        "levels" => "Niveaux",
        "nb_checks" => "Nombre de contrôles",
        "compliance_report_title" => "Rapport d'audit de conformité",
        "participants" => "Participants",
        "role" => "Rôle",
        "contact_information" => "Coordonnées",
        "auditee" => "Audité",
        "project_management" => "Gestion de projet",
        "authors" => "Auteurs",
        "modification_history" => "Historique des modifications",
        "author" => "Auteur",
        "report_writing" => "Rédaction du rapport",
        "nc_summary_title" => "Synthèse des non-conformités",
        "rule_name" => "Règle",
        "rule_level" => "Niveau",
        "rule_severity" => "Sévérité",
        "see_also" => "Voir aussi :",
        "check_command" => "Commande de vérification",
        "expected_result" => "Résultat attendu",
        "terminal_output" => "Sortie observée",
        _ => return None,
    })
}
