use std::collections::HashSet;
use std::path::PathBuf;

use crate::aggregate;
use crate::app::{AppContext, GramError, Result};
use crate::domain::{Comment, Post, UserRef};
use crate::guard::{authorize, Access, ACCESS_DENIED};
use crate::report::{Console, Operation, Render, Style};

/// Run one operation against the session's target.
///
/// Guarded operations on a private account the session does not follow print
/// the access notice and return without touching the backend.
pub async fn run(ctx: &AppContext, console: &mut dyn Console, operation: Operation) -> Result<()> {
    if operation.is_guarded()
        && authorize(ctx.target.is_private, ctx.target.is_following) == Access::Deny
    {
        tracing::warn!(
            account = %ctx.target.username,
            operation = operation.name(),
            "Access denied"
        );
        console.say(Style::Error, ACCESS_DENIED);
        return Ok(());
    }

    tracing::debug!(account = %ctx.target.username, operation = operation.name(), "Running");

    match operation {
        Operation::Addrs => {
            let posts = feed_posts(ctx).await?;
            emit(ctx, console, &aggregate::addresses(&posts))
        }
        Operation::Captions => {
            let posts = feed_posts(ctx).await?;
            emit(ctx, console, &aggregate::captions(&posts))
        }
        Operation::TotalComments => {
            let posts = feed_posts(ctx).await?;
            emit(ctx, console, &aggregate::total_comments(&posts))
        }
        Operation::CommentData => {
            let posts = feed_posts(ctx).await?;
            let per_post = comments_per_post(ctx, &posts).await?;
            emit(ctx, console, &aggregate::comment_data(per_post))
        }
        Operation::Followers | Operation::Followings => {
            let users = roster_users(ctx, operation == Operation::Followings).await?;
            emit(ctx, console, &aggregate::user_list(operation, users))
        }
        Operation::FollowersEmail
        | Operation::FollowingsEmail
        | Operation::FollowersPhone
        | Operation::FollowingsPhone => contacts(ctx, console, operation).await,
        Operation::Hashtags => {
            let posts = feed_posts(ctx).await?;
            emit(ctx, console, &aggregate::hashtag_frequency(&posts))
        }
        Operation::Info => {
            let profile = ctx.backend.fetch_profile(ctx.target.id).await?;
            emit(ctx, console, &aggregate::profile_report(profile))
        }
        Operation::Likes => {
            let posts = feed_posts(ctx).await?;
            emit(ctx, console, &aggregate::total_likes(&posts))
        }
        Operation::MediaType => {
            let posts = feed_posts(ctx).await?;
            emit(ctx, console, &aggregate::media_types(&posts))
        }
        Operation::PhotoDescriptions => {
            let posts = feed_posts(ctx).await?;
            emit(ctx, console, &aggregate::descriptions(&posts))
        }
        Operation::Photos => photos(ctx, console).await,
        Operation::Propic => propic(ctx, console).await,
        Operation::Stories => stories(ctx, console).await,
        Operation::Tagged => {
            let posts = feed_posts(ctx).await?;
            emit(ctx, console, &aggregate::tagged_by_user(&posts))
        }
        Operation::WhoCommented => {
            let posts = feed_posts(ctx).await?;
            let per_post = comments_per_post(ctx, &posts).await?;
            let data = aggregate::comment_data(per_post);
            emit(ctx, console, &aggregate::commenters(data.comments()))
        }
        Operation::WhoTagged => {
            let owners = tag_owners(ctx).await?;
            emit(ctx, console, &aggregate::taggers(owners))
        }
    }
}

fn emit<R: Render>(ctx: &AppContext, console: &mut dyn Console, result: &R) -> Result<()> {
    ctx.sink.emit(console, &ctx.target.username, result)?;
    Ok(())
}

async fn feed_posts(ctx: &AppContext) -> Result<Vec<Post>> {
    let (backend, id) = (&ctx.backend, ctx.target.id);
    let raw = ctx
        .paginator
        .drain("feed", move |cursor| backend.fetch_feed(id, cursor))
        .await?;
    Ok(raw.iter().map(|item| ctx.normalizer.post(item)).collect())
}

/// Comments of every post, one full drain per post, in feed order.
///
/// Posts without an id are skipped, and a post the feed repeats is drained
/// only once.
async fn comments_per_post(ctx: &AppContext, posts: &[Post]) -> Result<Vec<(String, Vec<Comment>)>> {
    let backend = &ctx.backend;
    let mut per_post = Vec::with_capacity(posts.len());
    let mut seen = HashSet::new();

    for post in posts {
        let post_id = post.id.as_str();
        if post_id.is_empty() {
            tracing::warn!("Skipping post without id");
            continue;
        }
        if !seen.insert(post_id) {
            tracing::debug!(post = post_id, "Skipping repeated post");
            continue;
        }
        let raw = ctx
            .paginator
            .drain("comments", move |cursor| backend.fetch_comments(post_id, cursor))
            .await?;
        let comments: Vec<Comment> = raw.iter().map(|item| ctx.normalizer.comment(item)).collect();
        per_post.push((post.id.clone(), comments));
    }

    Ok(per_post)
}

async fn roster_users(ctx: &AppContext, following: bool) -> Result<Vec<UserRef>> {
    let (backend, id) = (&ctx.backend, ctx.target.id);
    let raw = if following {
        ctx.paginator
            .drain("following", move |cursor| backend.fetch_following(id, cursor))
            .await?
    } else {
        ctx.paginator
            .drain("followers", move |cursor| backend.fetch_followers(id, cursor))
            .await?
    };
    Ok(raw.iter().map(|item| ctx.normalizer.user(item)).collect())
}

async fn tag_owners(ctx: &AppContext) -> Result<Vec<UserRef>> {
    let (backend, id) = (&ctx.backend, ctx.target.id);
    let raw = ctx
        .paginator
        .drain("usertags", move |cursor| backend.fetch_user_tags(id, cursor))
        .await?;
    Ok(raw.iter().map(|item| ctx.normalizer.tag_owner(item)).collect())
}

/// Follower or following contact details, one detail lookup per account.
async fn contacts(ctx: &AppContext, console: &mut dyn Console, operation: Operation) -> Result<()> {
    let following = matches!(
        operation,
        Operation::FollowingsEmail | Operation::FollowingsPhone
    );
    let users = roster_users(ctx, following).await?;

    let mut details = Vec::with_capacity(users.len());
    for user in users {
        let Some(id) = user.id else {
            tracing::warn!(username = %user.username, "Skipping account without id");
            continue;
        };
        let profile = ctx.backend.fetch_user_detail(id).await?;
        details.push((user, profile));
    }

    emit(ctx, console, &aggregate::contacts(operation, details))
}

fn media_path(ctx: &AppContext, name: &str, extension: &str) -> PathBuf {
    ctx.sink
        .dir()
        .join(format!("{}_{}.{}", ctx.target.username, name, extension))
}

async fn photos(ctx: &AppContext, console: &mut dyn Console) -> Result<()> {
    let posts = feed_posts(ctx).await?;
    let mut files = Vec::new();

    for post in &posts {
        if post.id.is_empty() {
            tracing::warn!("Skipping post without id");
            continue;
        }
        for (id, url) in post.image_urls() {
            if id.is_empty() {
                tracing::warn!(post = %post.id, "Skipping carousel item without id");
                continue;
            }
            let dest = media_path(ctx, &id, "jpg");
            ctx.downloader.download(url, &dest).await?;
            files.push(dest);
        }
    }

    emit(ctx, console, &aggregate::download_summary(Operation::Photos, files))
}

async fn propic(ctx: &AppContext, console: &mut dyn Console) -> Result<()> {
    let profile = ctx.backend.fetch_profile(ctx.target.id).await?;
    let url = profile
        .hd_profile_pic_url
        .ok_or(GramError::MissingMedia("profile picture"))?;

    let dest = media_path(ctx, "propic", "jpg");
    ctx.downloader.download(&url, &dest).await?;

    emit(ctx, console, &aggregate::download_summary(Operation::Propic, vec![dest]))
}

async fn stories(ctx: &AppContext, console: &mut dyn Console) -> Result<()> {
    let items = ctx.backend.fetch_story_reel(ctx.target.id).await?;
    let mut files = Vec::new();

    for item in &items {
        let asset = ctx.normalizer.media_asset(item);
        if asset.id.is_empty() {
            tracing::warn!("Skipping story item without id");
            continue;
        }
        let Some(url) = asset.best_url() else {
            tracing::warn!(story = %asset.id, "Story item has no media url");
            continue;
        };
        let dest = media_path(ctx, &asset.id, asset.extension());
        ctx.downloader.download(url, &dest).await?;
        files.push(dest);
    }

    emit(ctx, console, &aggregate::download_summary(Operation::Stories, files))
}
