use serde::{Deserialize, Serialize};

use super::{AddMember, MemberAdded, MemberId};

/// 会員 - 作成後は不変
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub admission_number: String,
}

/// 純粋関数：会員を作成する
///
/// 入学番号の重複チェックは行わない。
pub fn new_member(cmd: AddMember) -> (Member, MemberAdded) {
    let member = Member {
        id: MemberId::new(),
        name: cmd.name,
        admission_number: cmd.admission_number,
    };

    let event = MemberAdded {
        member: member.clone(),
    };

    (member, event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member() {
        let (member, event) = new_member(AddMember {
            name: "Alice".to_string(),
            admission_number: "A100".to_string(),
        });

        assert_eq!(member.name, "Alice");
        assert_eq!(member.admission_number, "A100");
        assert_eq!(event.member, member);
    }

    #[test]
    fn test_member_serializes_admission_number_in_camel_case() {
        let (member, _) = new_member(AddMember {
            name: "Bob".to_string(),
            admission_number: "B7".to_string(),
        });

        let value = serde_json::to_value(&member).unwrap();
        assert_eq!(value["admissionNumber"], "B7");
    }
}
