//! The reference workflow. Each step awaits the previous one.

use domain_social::{
    CreateFollowInput, CreatePostEmbeddingInput, CreatePostInput, CreateUserInput, GatewayResult,
    Post, SearchPostEmbeddingsInput, SocialClient, User, UserIdInput,
};

const USERS: [(&str, u32, &str); 3] = [
    ("Alice", 25, "alice@example.com"),
    ("Bob", 30, "bob@example.com"),
    ("Charlie", 28, "charlie@example.com"),
];

const POSTS: [(&str, [f64; 5]); 3] = [
    (
        "Hello world! My first post on HelixDB",
        [0.1, 0.2, 0.3, 0.4, 0.5],
    ),
    (
        "Loving the graph database capabilities",
        [0.2, 0.3, 0.4, 0.5, 0.6],
    ),
    (
        "Building cool social networks with Helix",
        [0.3, 0.4, 0.5, 0.6, 0.7],
    ),
];

/// What the read half of the workflow returned.
#[derive(Debug)]
pub struct Summary {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub alice_posts: Vec<Post>,
    pub alice_following: Vec<User>,
    pub bob_followers: Vec<User>,
    pub similar: Vec<Post>,
}

pub async fn run(client: &SocialClient) -> GatewayResult<Summary> {
    println!("Creating 3 users...");
    let mut users = Vec::with_capacity(USERS.len());
    for (name, age, email) in USERS {
        let user = client
            .create_user(&CreateUserInput {
                name: name.to_string(),
                age,
                email: email.to_string(),
            })
            .await?;
        println!("Created {}: {:?}", name, user);
        users.push(user);
    }
    let [alice, bob, charlie] = [&users[0], &users[1], &users[2]];

    println!("Creating follow relationships...");
    for (follower, followed) in [(alice, bob), (bob, charlie), (charlie, alice)] {
        client
            .create_follow(&CreateFollowInput {
                follower_id: follower.id.clone(),
                followed_id: followed.id.clone(),
            })
            .await?;
        println!("{} follows {}: success", follower.name, followed.name);
    }

    println!("Creating posts...");
    for (author, (content, vector)) in users.iter().zip(POSTS) {
        let post = client
            .create_post(&CreatePostInput {
                user_id: author.id.clone(),
                content: content.to_string(),
            })
            .await?;
        println!("Created {}'s post: {:?}", author.name, post);

        client
            .create_post_embedding(&CreatePostEmbeddingInput {
                post_id: post.id,
                vector: vector.to_vec(),
                content: content.to_string(),
            })
            .await?;
        println!("Created {}'s embedding: success", author.name);
    }

    println!("\nQuerying and displaying the data...");

    println!("All Users:");
    let all_users = client.get_users().await?;
    println!("{:?}", all_users);

    println!("\nAll Posts:");
    let posts = client.get_posts().await?;
    println!("{:?}", posts);

    println!("\nAlice's Posts:");
    let alice_posts = client
        .get_posts_by_user(&UserIdInput {
            user_id: alice.id.clone(),
        })
        .await?;
    println!("{:?}", alice_posts);

    println!("\nWho Alice is Following:");
    let alice_following = client
        .get_following(&UserIdInput {
            user_id: alice.id.clone(),
        })
        .await?;
    println!("{:?}", alice_following);

    println!("\nBob's Followers:");
    let bob_followers = client
        .get_followers(&UserIdInput {
            user_id: bob.id.clone(),
        })
        .await?;
    println!("{:?}", bob_followers);

    let query = POSTS[0].1.to_vec();
    println!("\nSearching for posts similar to {:?}:", query);
    let similar = client
        .search_post_embeddings(&SearchPostEmbeddingsInput {
            vector: query,
            k: 1,
        })
        .await?;
    println!("{:?}", similar);

    Ok(Summary {
        users: all_users,
        posts,
        alice_posts,
        alice_following,
        bob_followers,
        similar,
    })
}
