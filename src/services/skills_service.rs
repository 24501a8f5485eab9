use serde::Serialize;

#[derive(Debug, Serialize, Clone)]
pub struct SkillCategory {
    pub title: &'static str,
    pub skills: &'static [&'static str],
}

const SKILL_CATEGORIES: &[SkillCategory] = &[
    SkillCategory {
        title: "Languages",
        skills: &["Go", "Python", "JavaScript", "TypeScript", "Rust"],
    },
    SkillCategory {
        title: "Frameworks & Libraries",
        skills: &["Node.js", "React", "Astro", "Tailwind CSS", "Svelte"],
    },
    SkillCategory {
        title: "Databases",
        skills: &["MongoDB", "MariaDB", "ClickHouse"],
    },
    SkillCategory {
        title: "Tools & Platforms",
        skills: &["Docker", "Bash", "Ubuntu"],
    },
];

pub fn skill_categories() -> &'static [SkillCategory] {
    SKILL_CATEGORIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_serialize_in_display_order() {
        let out = serde_json::to_value(skill_categories()).unwrap();
        assert_eq!(out[0]["title"], "Languages");
        assert_eq!(out[3]["skills"][2], "Ubuntu");
        assert_eq!(out.as_array().unwrap().len(), 4);
    }
}
