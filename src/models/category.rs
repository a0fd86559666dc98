//! 排除类别
//!
//! 体育课（PE）与国民服务培训计划（NSTP）可以按需从 GWA 计算中排除

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// 排除类别枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// 体育课
    PhysicalEducation,
    /// 国民服务培训计划
    ServiceProgram,
}

/// 类别名称查找表（小写）
static CATEGORY_NAMES: phf::Map<&'static str, Category> = phf_map! {
    "pe" => Category::PhysicalEducation,
    "physical-education" => Category::PhysicalEducation,
    "pahf" => Category::PhysicalEducation,
    "nstp" => Category::ServiceProgram,
    "service-program" => Category::ServiceProgram,
};

impl Category {
    pub const ALL: [Category; 2] = [Category::PhysicalEducation, Category::ServiceProgram];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Category::PhysicalEducation => "physical-education",
            Category::ServiceProgram => "service-program",
        }
    }

    /// 从名称解析类别（忽略大小写和首尾空白）
    pub fn from_name(s: &str) -> Option<Self> {
        CATEGORY_NAMES.get(s.trim().to_lowercase().as_str()).copied()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 当前生效的排除类别集合
///
/// 每次调用时由调用方提供，流水线不保留
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorySet {
    exclude_pe: bool,
    exclude_nstp: bool,
}

impl CategorySet {
    /// 空集合，不排除任何课程
    pub fn none() -> Self {
        Self::default()
    }

    /// 根据两个开关创建
    pub fn from_flags(exclude_pe: bool, exclude_nstp: bool) -> Self {
        Self {
            exclude_pe,
            exclude_nstp,
        }
    }

    /// 解析逗号分隔的类别列表，例如 `"pe,nstp"`
    ///
    /// 无法识别的名称会被返回，由调用方决定如何处理
    pub fn parse_list(list: &str) -> Result<Self, String> {
        let mut set = Self::none();
        for name in list.split(',').filter(|s| !s.trim().is_empty()) {
            let category = Category::from_name(name).ok_or_else(|| name.trim().to_string())?;
            set.insert(category);
        }
        Ok(set)
    }

    pub fn insert(&mut self, category: Category) {
        match category {
            Category::PhysicalEducation => self.exclude_pe = true,
            Category::ServiceProgram => self.exclude_nstp = true,
        }
    }

    pub fn contains(&self, category: Category) -> bool {
        match category {
            Category::PhysicalEducation => self.exclude_pe,
            Category::ServiceProgram => self.exclude_nstp,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.exclude_pe && !self.exclude_nstp
    }

    /// 按固定顺序遍历生效的类别
    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl std::fmt::Display for CategorySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<&str> = self.iter().map(Category::name).collect();
        write!(f, "{}", names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(Category::from_name("PE"), Some(Category::PhysicalEducation));
        assert_eq!(Category::from_name(" Nstp "), Some(Category::ServiceProgram));
        assert_eq!(
            Category::from_name("service-program"),
            Some(Category::ServiceProgram)
        );
        assert_eq!(Category::from_name("math"), None);
    }

    #[test]
    fn test_parse_list() {
        let set = CategorySet::parse_list("pe, nstp").unwrap();
        assert!(set.contains(Category::PhysicalEducation));
        assert!(set.contains(Category::ServiceProgram));

        let set = CategorySet::parse_list("").unwrap();
        assert!(set.is_empty());

        assert_eq!(CategorySet::parse_list("pe,art"), Err("art".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(CategorySet::none().to_string(), "none");
        assert_eq!(
            CategorySet::from_flags(true, true).to_string(),
            "physical-education,service-program"
        );
    }
}
