use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 考纲中的一个考点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusTopic {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// 考纲目录（只读）
///
/// 保持考点的原始顺序，序列化结果稳定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusCatalog {
    pub topics: Vec<SyllabusTopic>,
}

/// 苏教版四年级上册数学（2024）
const BUILTIN_TOPICS: &[(&str, &str, &str)] = &[
    ("G4A-01", "升和毫升", "认识容量单位升和毫升，知道 1 升 = 1000 毫升，能估计和测量常见容器的容量"),
    ("G4A-02", "两、三位数除以整十数", "掌握除数是整十数的口算和笔算方法，理解商的位置"),
    ("G4A-03", "两、三位数除以两位数", "掌握除数是两位数的笔算除法，会用四舍五入法试商并调商"),
    ("G4A-04", "商不变的规律", "理解被除数和除数同时乘或除以相同的数（0 除外）商不变，并用于简便计算"),
    ("G4A-05", "观察物体", "从前面、右面、上面观察由几个正方体组成的物体，能画出看到的形状"),
    ("G4A-06", "统计表和条形统计图", "会填写单式统计表，认识一格表示多个单位的条形统计图，并能进行简单分析"),
    ("G4A-07", "解决问题的策略（列表）", "用列表的方法整理条件和问题，分析数量关系并解决实际问题"),
    ("G4A-08", "可能性", "能判断事件发生的可能性大小，用一定、可能、不可能描述事件"),
    ("G4A-09", "整数四则混合运算", "掌握不含括号和含有小括号、中括号的三步混合运算顺序，能列综合算式解决问题"),
    ("G4A-10", "垂线与平行线", "认识射线、直线和角，会用量角器量角和画角，理解垂直与平行，会画垂线和平行线"),
    ("G4A-11", "点到直线的距离", "理解点到直线的垂直线段最短，会测量点到直线的距离和平行线间的距离"),
    ("G4A-12", "找规律（间隔排列）", "探索两种物体间隔排列时数量之间的规律，并能应用于简单问题"),
];

impl SyllabusCatalog {
    pub fn new(topics: Vec<SyllabusTopic>) -> Self {
        Self { topics }
    }

    /// 内置考纲
    pub fn builtin() -> Self {
        let topics = BUILTIN_TOPICS
            .iter()
            .map(|(id, name, description)| SyllabusTopic {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
            })
            .collect();
        Self { topics }
    }

    pub fn contains(&self, topic_id: &str) -> bool {
        self.topics.iter().any(|t| t.id == topic_id)
    }

    pub fn get(&self, topic_id: &str) -> Option<&SyllabusTopic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }

    /// 考点名称，找不到时返回 id 本身
    pub fn topic_name<'a>(&'a self, topic_id: &'a str) -> &'a str {
        self.get(topic_id).map(|t| t.name.as_str()).unwrap_or(topic_id)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// 返回第一个重复的考点 id
    pub fn first_duplicate_id(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.topics
            .iter()
            .map(|t| t.id.as_str())
            .find(|id| !seen.insert(*id))
    }
}

impl Default for SyllabusCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
