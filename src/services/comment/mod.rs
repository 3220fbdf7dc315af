pub mod model;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use self::model::{CommentsVo, CreateCommentRequest};
use crate::database::models::{Comment, NewComment};
use crate::database::repositories::{CommentStore, PostStore};
use crate::error::AppError;

const MAX_COMMENT_CHARS: usize = 1024;

/// 评论树的最大嵌套层数
pub const MAX_REPLY_DEPTH: usize = 32;

/// 文章评论，支持楼中楼回复
pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    posts: Arc<dyn PostStore>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentStore>, posts: Arc<dyn PostStore>) -> Self {
        Self { comments, posts }
    }

    pub async fn create_comment(
        &self,
        user_id: i64,
        req: CreateCommentRequest,
    ) -> Result<Comment, AppError> {
        let content = req.content.trim();
        if content.is_empty() || content.chars().count() > MAX_COMMENT_CHARS {
            return Err(AppError::Validation(format!(
                "评论内容长度必须在1到{MAX_COMMENT_CHARS}个字符之间"
            )));
        }

        if self.posts.find_by_id(req.post_id).await?.is_none() {
            return Err(AppError::PostNotFound);
        }

        if let Some(parent_id) = req.reply_to_comment_id {
            match self.comments.find_by_id(parent_id).await? {
                Some(parent) if parent.post_id == req.post_id => {}
                _ => return Err(AppError::CommentNotFound),
            }
        }

        let comment = self
            .comments
            .insert(NewComment {
                content: content.to_string(),
                user_id,
                post_id: req.post_id,
                reply_to_comment_id: req.reply_to_comment_id,
            })
            .await?;

        tracing::info!(
            comment_id = comment.id,
            post_id = comment.post_id,
            user_id,
            "Comment created"
        );
        Ok(comment)
    }

    /// 文章下的评论树
    pub async fn get_comment_graph(&self, post_id: i64) -> Result<Vec<CommentsVo>, AppError> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(AppError::PostNotFound);
        }

        let comments = self.comments.list_by_post(post_id).await?;
        Ok(build_comment_graph(comments))
    }

    /// 删除评论及其全部回复，仅评论作者可操作
    pub async fn delete_comment(&self, user_id: i64, id: i64) -> Result<u64, AppError> {
        let comment = self
            .comments
            .find_by_id(id)
            .await?
            .ok_or(AppError::CommentNotFound)?;

        if comment.user_id != user_id {
            tracing::warn!(comment_id = id, user_id, "Rejected comment deletion by non-author");
            return Err(AppError::Forbidden);
        }

        let siblings = self.comments.list_by_post(comment.post_id).await?;
        let ids = subtree_ids(id, &siblings);
        let deleted = self.comments.delete_many(&ids).await?;

        tracing::info!(comment_id = id, deleted, "Comment deleted");
        Ok(deleted)
    }
}

/// 将扁平评论列表组装为树，父评论缺失的回复挂在顶层。
///
/// 嵌套超过 [`MAX_REPLY_DEPTH`] 层的回复平铺在最后一层，保证返回的树深度有界。
pub fn build_comment_graph(comments: Vec<Comment>) -> Vec<CommentsVo> {
    let ids: HashSet<i64> = comments.iter().map(|c| c.id).collect();
    let mut children: HashMap<Option<i64>, Vec<Comment>> = HashMap::new();
    for comment in comments {
        let parent = comment.reply_to_comment_id.filter(|p| ids.contains(p));
        children.entry(parent).or_default().push(comment);
    }

    // 广度优先确定每条评论的挂载点，(评论, 挂载父节点, 所在层级)
    let mut ordered: Vec<(Comment, Option<i64>, usize)> = Vec::with_capacity(ids.len());
    for root in children.remove(&None).unwrap_or_default() {
        ordered.push((root, None, 1));
    }
    let mut cursor = 0;
    while cursor < ordered.len() {
        let (id, attach_to, depth) = {
            let (comment, parent, depth) = &ordered[cursor];
            (comment.id, *parent, *depth)
        };
        let (parent, child_depth) = if depth < MAX_REPLY_DEPTH {
            (Some(id), depth + 1)
        } else {
            (attach_to, depth)
        };
        for reply in children.remove(&Some(id)).unwrap_or_default() {
            ordered.push((reply, parent, child_depth));
        }
        cursor += 1;
    }

    // 逆序组装，子节点总是先于父节点完成
    let mut replies: HashMap<Option<i64>, Vec<CommentsVo>> = HashMap::new();
    for (comment, parent, _) in ordered.into_iter().rev() {
        let id = comment.id;
        let mut vo = CommentsVo::from(comment);
        vo.replies = replies.remove(&Some(id)).unwrap_or_default();
        vo.replies.sort_by_key(|c| c.id);
        replies.entry(parent).or_default().push(vo);
    }

    let mut roots = replies.remove(&None).unwrap_or_default();
    roots.sort_by_key(|c| c.id);
    roots
}

fn subtree_ids(root: i64, comments: &[Comment]) -> Vec<i64> {
    let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
    for comment in comments {
        if let Some(parent) = comment.reply_to_comment_id {
            children.entry(parent).or_default().push(comment.id);
        }
    }

    let mut ids = vec![root];
    let mut cursor = 0;
    while cursor < ids.len() {
        if let Some(replies) = children.remove(&ids[cursor]) {
            ids.extend(replies);
        }
        cursor += 1;
    }
    ids
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::database::models::NewPost;
    use crate::database::{MemoryCommentStore, MemoryPostStore};

    fn comment(id: i64, reply_to: Option<i64>) -> Comment {
        Comment {
            id,
            content: format!("c{id}"),
            user_id: 1,
            post_id: 1,
            reply_to_comment_id: reply_to,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn graph_nests_replies_under_parents() {
        let graph = build_comment_graph(vec![
            comment(3, Some(1)),
            comment(1, None),
            comment(2, None),
            comment(4, Some(3)),
            comment(5, Some(99)),
        ]);

        let roots: Vec<_> = graph.iter().map(|c| c.id).collect();
        assert_eq!(roots, [1, 2, 5]);
        assert_eq!(graph[0].replies[0].id, 3);
        assert_eq!(graph[0].replies[0].replies[0].id, 4);
        assert!(graph[1].replies.is_empty());
    }

    fn depth_of(graph: &[CommentsVo]) -> usize {
        let mut max = 0;
        let mut stack: Vec<(&CommentsVo, usize)> = graph.iter().map(|c| (c, 1)).collect();
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            stack.extend(node.replies.iter().map(|c| (c, depth + 1)));
        }
        max
    }

    fn count_of(graph: &[CommentsVo]) -> usize {
        let mut total = 0;
        let mut stack: Vec<&CommentsVo> = graph.iter().collect();
        while let Some(node) = stack.pop() {
            total += 1;
            stack.extend(node.replies.iter());
        }
        total
    }

    #[test]
    fn long_reply_chain_is_flattened_past_max_depth() {
        let chain: Vec<_> = (1..=10_000)
            .map(|id| comment(id, (id > 1).then_some(id - 1)))
            .collect();

        let graph = build_comment_graph(chain);
        assert_eq!(graph.len(), 1);
        assert_eq!(depth_of(&graph), MAX_REPLY_DEPTH);
        assert_eq!(count_of(&graph), 10_000);

        // 最后一层按 ID 顺序平铺
        let mut node = &graph[0];
        for _ in 1..MAX_REPLY_DEPTH - 1 {
            node = &node.replies[0];
        }
        let flat: Vec<_> = node.replies.iter().map(|c| c.id).collect();
        assert_eq!(flat.len(), 10_000 - (MAX_REPLY_DEPTH - 1));
        assert_eq!(flat[0], MAX_REPLY_DEPTH as i64);
        assert!(flat.windows(2).all(|w| w[0] < w[1]));
        assert!(node.replies.iter().all(|c| c.replies.is_empty()));

        assert!(serde_json::to_string(&graph).is_ok());
    }

    #[test]
    fn subtree_collects_all_descendants() {
        let comments = vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, Some(2)),
            comment(4, None),
        ];
        assert_eq!(subtree_ids(1, &comments), [1, 2, 3]);
    }

    async fn service_with_post() -> (CommentService, i64) {
        let posts = Arc::new(MemoryPostStore::new());
        let post = posts
            .insert(NewPost {
                title: "p".into(),
                image: String::new(),
                visibility: true,
                content_markdown: String::new(),
                content_html: String::new(),
            })
            .await
            .unwrap();
        (CommentService::new(Arc::new(MemoryCommentStore::new()), posts), post.id)
    }

    fn create_req(post_id: i64, reply_to: Option<i64>) -> CreateCommentRequest {
        CreateCommentRequest {
            post_id,
            content: "nice post".into(),
            reply_to_comment_id: reply_to,
        }
    }

    #[tokio::test]
    async fn reply_target_must_exist() {
        let (service, post_id) = service_with_post().await;
        let err = service
            .create_comment(1, create_req(post_id, Some(42)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::CommentNotFound));

        let err = service
            .create_comment(1, create_req(post_id + 1, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PostNotFound));
    }

    #[tokio::test]
    async fn only_author_deletes_and_subtree_goes_with_it() {
        let (service, post_id) = service_with_post().await;
        let root = service
            .create_comment(1, create_req(post_id, None))
            .await
            .unwrap();
        let reply = service
            .create_comment(2, create_req(post_id, Some(root.id)))
            .await
            .unwrap();
        service
            .create_comment(1, create_req(post_id, Some(reply.id)))
            .await
            .unwrap();
        service.create_comment(2, create_req(post_id, None)).await.unwrap();

        assert!(matches!(
            service.delete_comment(2, root.id).await,
            Err(AppError::Forbidden)
        ));

        assert_eq!(service.delete_comment(1, root.id).await.unwrap(), 3);
        let graph = service.get_comment_graph(post_id).await.unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph[0].user_id, 2);
    }
}
