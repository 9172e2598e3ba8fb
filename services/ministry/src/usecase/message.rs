use worship_domain::id::{MinistryId, UserId};

use crate::domain::repository::{MessageRepository, MinistryMemberRepository, MinistryRepository};
use crate::domain::types::{Message, NewMessage};
use crate::error::MinistryServiceError;
use crate::usecase::access::require_membership;

// ── ListMessages ─────────────────────────────────────────────────────────────

pub struct ListMessagesUseCase<'a, R>
where
    R: MinistryRepository + MinistryMemberRepository + MessageRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> ListMessagesUseCase<'_, R>
where
    R: MinistryRepository + MinistryMemberRepository + MessageRepository + ?Sized,
{
    /// The caller's feed: team broadcasts plus the caller's own direct
    /// messages. With `participant`, only the direct conversation between the
    /// caller and that user.
    pub async fn execute(
        &self,
        ministry_id: MinistryId,
        caller: UserId,
        participant: Option<UserId>,
    ) -> Result<Vec<Message>, MinistryServiceError> {
        require_membership(self.repo, ministry_id, caller).await?;
        let messages = match participant {
            Some(other) => self
                .repo
                .list_messages(ministry_id, Some(caller))
                .await?
                .into_iter()
                .filter(|m| m.is_between(caller, other))
                .collect(),
            None => self
                .repo
                .list_messages(ministry_id, None)
                .await?
                .into_iter()
                .filter(|m| m.is_visible_to(caller))
                .collect(),
        };
        Ok(messages)
    }
}

// ── SendMessage ──────────────────────────────────────────────────────────────

pub struct SendMessageUseCase<'a, R>
where
    R: MinistryRepository + MinistryMemberRepository + MessageRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> SendMessageUseCase<'_, R>
where
    R: MinistryRepository + MinistryMemberRepository + MessageRepository + ?Sized,
{
    /// Without a recipient the message is a broadcast to the ministry.
    /// A direct recipient must be on the same team.
    pub async fn execute(&self, message: NewMessage) -> Result<Message, MinistryServiceError> {
        require_membership(self.repo, message.ministry_id, message.sender_id).await?;
        if message.content.trim().is_empty() {
            return Err(MinistryServiceError::InvalidInput);
        }
        if let Some(recipient) = message.recipient_id {
            let on_team = self
                .repo
                .list_memberships_for_user(recipient)
                .await?
                .iter()
                .any(|m| m.ministry_id == message.ministry_id);
            if !on_team {
                return Err(MinistryServiceError::InvalidReference);
            }
        }
        self.repo.create_message(message).await
    }
}

// ── MarkMessagesRead ─────────────────────────────────────────────────────────

pub struct MarkMessagesReadUseCase<'a, R>
where
    R: MinistryRepository + MinistryMemberRepository + MessageRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> MarkMessagesReadUseCase<'_, R>
where
    R: MinistryRepository + MinistryMemberRepository + MessageRepository + ?Sized,
{
    /// Marks everything `sender_id` sent to the caller as read, in any
    /// ministry. `ministry_id` only gates access.
    pub async fn execute(
        &self,
        ministry_id: MinistryId,
        caller: UserId,
        sender_id: UserId,
    ) -> Result<bool, MinistryServiceError> {
        require_membership(self.repo, ministry_id, caller).await?;
        self.repo.mark_messages_read(caller, sender_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worship_domain::role::MemberRole;

    use crate::domain::repository::UserRepository;
    use crate::domain::types::{NewMinistry, NewMinistryMember, NewUser};
    use crate::infra::memory::MemoryStorage;
    use crate::infra::seed::DEMO_USERNAME;

    struct Fixture {
        storage: MemoryStorage,
        ministry_id: MinistryId,
        admin: UserId,
        bob: UserId,
    }

    async fn fixture() -> Fixture {
        let storage = MemoryStorage::with_demo_data().await.unwrap();
        let admin = storage
            .find_user_by_username(DEMO_USERNAME)
            .await
            .unwrap()
            .unwrap()
            .id;
        let ministry_id = storage.list_ministries().await.unwrap()[0].id;
        let bob = storage
            .create_user(NewUser {
                username: "bob".into(),
                password: "secret".into(),
                ..Default::default()
            })
            .await
            .unwrap()
            .id;
        storage
            .create_ministry_member(NewMinistryMember {
                ministry_id,
                user_id: bob,
                role: MemberRole::Member,
                position: Some("Bass".into()),
            })
            .await
            .unwrap();
        Fixture {
            storage,
            ministry_id,
            admin,
            bob,
        }
    }

    fn message(f: &Fixture, from: UserId, to: Option<UserId>, content: &str) -> NewMessage {
        NewMessage {
            ministry_id: f.ministry_id,
            sender_id: from,
            recipient_id: to,
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn should_send_and_list_conversation() {
        let f = fixture().await;
        let send = SendMessageUseCase { repo: &f.storage };
        send.execute(message(&f, f.admin, None, "Rehearsal at 7"))
            .await
            .unwrap();
        send.execute(message(&f, f.admin, Some(f.bob), "Can you lead bass?"))
            .await
            .unwrap();
        send.execute(message(&f, f.bob, Some(f.admin), "Sure"))
            .await
            .unwrap();

        let list = ListMessagesUseCase { repo: &f.storage };
        let all = list.execute(f.ministry_id, f.admin, None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].content, "Rehearsal at 7");

        let with_admin = list
            .execute(f.ministry_id, f.bob, Some(f.admin))
            .await
            .unwrap();
        let contents: Vec<_> = with_admin.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["Can you lead bass?", "Sure"]);
    }

    #[tokio::test]
    async fn should_hide_other_members_direct_messages() {
        let f = fixture().await;
        let carol = f
            .storage
            .create_user(NewUser {
                username: "carol".into(),
                password: "secret".into(),
                ..Default::default()
            })
            .await
            .unwrap()
            .id;
        f.storage
            .create_ministry_member(NewMinistryMember {
                ministry_id: f.ministry_id,
                user_id: carol,
                role: MemberRole::Member,
                position: None,
            })
            .await
            .unwrap();
        let send = SendMessageUseCase { repo: &f.storage };
        send.execute(message(&f, f.admin, None, "Rehearsal at 7"))
            .await
            .unwrap();
        send.execute(message(&f, f.admin, Some(f.bob), "Private to bob"))
            .await
            .unwrap();

        let list = ListMessagesUseCase { repo: &f.storage };
        let feed = list.execute(f.ministry_id, carol, None).await.unwrap();
        let contents: Vec<_> = feed.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["Rehearsal at 7"]);

        let with_bob = list
            .execute(f.ministry_id, carol, Some(f.bob))
            .await
            .unwrap();
        assert!(with_bob.is_empty());
    }

    #[tokio::test]
    async fn should_reject_recipient_outside_team() {
        let f = fixture().await;
        let outsider = f
            .storage
            .create_user(NewUser {
                username: "outsider".into(),
                password: "secret".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let result = SendMessageUseCase { repo: &f.storage }
            .execute(message(&f, f.admin, Some(outsider.id), "hello"))
            .await;
        assert!(matches!(result, Err(MinistryServiceError::InvalidReference)));
    }

    #[tokio::test]
    async fn should_mark_only_incoming_from_sender() {
        let f = fixture().await;
        let send = SendMessageUseCase { repo: &f.storage };
        let incoming = send
            .execute(message(&f, f.bob, Some(f.admin), "Running late"))
            .await
            .unwrap();
        let outgoing = send
            .execute(message(&f, f.admin, Some(f.bob), "No problem"))
            .await
            .unwrap();

        let done = MarkMessagesReadUseCase { repo: &f.storage }
            .execute(f.ministry_id, f.admin, f.bob)
            .await
            .unwrap();
        assert!(done);

        assert!(f.storage.find_message(incoming.id).await.unwrap().unwrap().read);
        assert!(!f.storage.find_message(outgoing.id).await.unwrap().unwrap().read);
    }

    #[tokio::test]
    async fn should_mark_sender_messages_read_across_shared_ministries() {
        let f = fixture().await;
        let choir = f
            .storage
            .create_ministry(NewMinistry {
                name: "Youth Choir".into(),
                code: "YTHC".into(),
                created_by: f.admin,
                logo: None,
            })
            .await
            .unwrap();
        for user_id in [f.admin, f.bob] {
            f.storage
                .create_ministry_member(NewMinistryMember {
                    ministry_id: choir.id,
                    user_id,
                    role: MemberRole::Member,
                    position: None,
                })
                .await
                .unwrap();
        }
        let send = SendMessageUseCase { repo: &f.storage };
        let here = send
            .execute(message(&f, f.bob, Some(f.admin), "Running late"))
            .await
            .unwrap();
        let elsewhere = send
            .execute(NewMessage {
                ministry_id: choir.id,
                sender_id: f.bob,
                recipient_id: Some(f.admin),
                content: "Choir notes".into(),
            })
            .await
            .unwrap();

        MarkMessagesReadUseCase { repo: &f.storage }
            .execute(f.ministry_id, f.admin, f.bob)
            .await
            .unwrap();

        assert!(f.storage.find_message(here.id).await.unwrap().unwrap().read);
        assert!(f.storage.find_message(elsewhere.id).await.unwrap().unwrap().read);
    }
}
