//! Built-in starting documents.

use crate::interchange::DocumentError;
use crate::model::{Adt, Axiom, Implementation, Implementations, Profile, Variant};

/// Names accepted by [`by_name`].
pub const NAMES: [&str; 2] = ["stack", "queue"];

/// Look up a template by name, ignoring case. Each call returns a fresh copy.
pub fn by_name(name: &str) -> Option<Adt> {
    match name.trim().to_ascii_lowercase().as_str() {
        "stack" => Some(stack()),
        "queue" => Some(queue()),
        _ => None,
    }
}

/// Like [`by_name`], with an error listing the available templates.
pub fn require(name: &str) -> Result<Adt, DocumentError> {
    by_name(name).ok_or_else(|| DocumentError::UnknownTemplate {
        name: name.to_string(),
        available: NAMES.join(", "),
    })
}

fn profile(id: &str, name: &str, signature: &str, description: &str, preconditions: &[&str]) -> Profile {
    Profile {
        id: id.to_string(),
        name: name.to_string(),
        signature: signature.to_string(),
        description: Some(description.to_string()),
        preconditions: preconditions.iter().map(|p| p.to_string()).collect(),
    }
}

fn axiom(id: &str, expression: &str, related: &[&str]) -> Axiom {
    Axiom {
        id: id.to_string(),
        expression: expression.to_string(),
        description: None,
        related_profile_ids: related.iter().map(|r| r.to_string()).collect(),
    }
}

fn implementation(variant: Variant, domain_space: &str, methods: &[(&str, &str)]) -> Implementation {
    Implementation {
        domain_space: domain_space.to_string(),
        methods: methods
            .iter()
            .map(|(id, code)| (id.to_string(), code.to_string()))
            .collect(),
        ..Implementation::empty(variant)
    }
}

pub fn stack() -> Adt {
    Adt {
        name: "Stack".to_string(),
        domain: "A LIFO (Last-In, First-Out) sequence of elements.".to_string(),
        uses: "Function calls, undo mechanisms, parsing expressions.".to_string(),
        profiles: vec![
            profile(
                "op-push",
                "push",
                "push(s: Stack, x: Item) -> void",
                "Adds an element x to the top of the stack s.",
                &["!full(s)"],
            ),
            profile(
                "op-pop",
                "pop",
                "pop(s: Stack) -> void",
                "Removes the top element from the stack s.",
                &["!empty(s)"],
            ),
            profile(
                "op-top",
                "top",
                "top(s: Stack) -> Item",
                "Returns the top element of the stack s without removing it.",
                &["!empty(s)"],
            ),
            profile(
                "op-empty",
                "empty",
                "empty(s: Stack) -> Boolean",
                "Returns true if the stack s contains no elements.",
                &[],
            ),
        ],
        axioms: vec![
            axiom("ax-1", "empty(new()) = true", &["op-empty"]),
            axiom("ax-2", "empty(push(s, x)) = false", &["op-empty", "op-push"]),
            axiom("ax-3", "top(push(s, x)) = x", &["op-top", "op-push"]),
            axiom("ax-4", "pop(push(s, x)) = s", &["op-pop", "op-push"]),
        ],
        implementations: Implementations {
            contiguous: implementation(
                Variant::Contiguous,
                "// Array-based implementation
struct Stack {
    items: Array[MAX_SIZE]
    top_index: int
}",
                &[
                    (
                        "op-push",
                        "procedure push(s, x):
    if s.top_index == MAX_SIZE - 1:
        error \"Stack Overflow\"
    s.top_index = s.top_index + 1
    s.items[s.top_index] = x",
                    ),
                    (
                        "op-pop",
                        "procedure pop(s):
    if s.top_index == -1:
        error \"Stack Underflow\"
    s.top_index = s.top_index - 1",
                    ),
                    (
                        "op-top",
                        "procedure top(s):
    if s.top_index == -1:
        error \"Stack Underflow\"
    return s.items[s.top_index]",
                    ),
                    (
                        "op-empty",
                        "procedure empty(s):
    return s.top_index == -1",
                    ),
                ],
            ),
            chained: implementation(
                Variant::Chained,
                "// Linked-list implementation
struct Node {
    data: Item
    next: Node
}
struct Stack {
    top_node: Node
}",
                &[
                    (
                        "op-push",
                        "procedure push(s, x):
    new_node = new Node()
    new_node.data = x
    new_node.next = s.top_node
    s.top_node = new_node",
                    ),
                    (
                        "op-pop",
                        "procedure pop(s):
    if s.top_node == null:
        error \"Stack Underflow\"
    s.top_node = s.top_node.next",
                    ),
                    (
                        "op-top",
                        "procedure top(s):
    if s.top_node == null:
        error \"Stack Underflow\"
    return s.top_node.data",
                    ),
                    (
                        "op-empty",
                        "procedure empty(s):
    return s.top_node == null",
                    ),
                ],
            ),
        },
    }
}

pub fn queue() -> Adt {
    Adt {
        name: "Queue".to_string(),
        domain: "A FIFO (First-In, First-Out) sequence of elements.".to_string(),
        uses: "Job scheduling, breadth-first search, buffering.".to_string(),
        profiles: vec![
            profile(
                "op-enqueue",
                "enqueue",
                "enqueue(q: Queue, x: Item) -> void",
                "Adds an element x to the back of the queue q.",
                &["!full(q)"],
            ),
            profile(
                "op-dequeue",
                "dequeue",
                "dequeue(q: Queue) -> void",
                "Removes the front element from the queue q.",
                &["!empty(q)"],
            ),
            profile(
                "op-front",
                "front",
                "front(q: Queue) -> Item",
                "Returns the front element of the queue q without removing it.",
                &["!empty(q)"],
            ),
        ],
        axioms: vec![
            axiom("ax-1", "empty(new()) = true", &[]),
            axiom("ax-2", "front(enqueue(new(), x)) = x", &["op-front", "op-enqueue"]),
            axiom(
                "ax-3",
                "front(enqueue(enqueue(q, x), y)) = front(enqueue(q, x))",
                &["op-front", "op-enqueue"],
            ),
        ],
        implementations: Implementations {
            contiguous: implementation(
                Variant::Contiguous,
                "// Circular array implementation
struct Queue {
    items: Array[MAX_SIZE]
    head: int
    tail: int
    count: int
}",
                &[
                    (
                        "op-enqueue",
                        "procedure enqueue(q, x):
    if q.count == MAX_SIZE:
        error \"Queue Overflow\"
    q.items[q.tail] = x
    q.tail = (q.tail + 1) % MAX_SIZE
    q.count = q.count + 1",
                    ),
                    (
                        "op-dequeue",
                        "procedure dequeue(q):
    if q.count == 0:
        error \"Queue Underflow\"
    q.head = (q.head + 1) % MAX_SIZE
    q.count = q.count - 1",
                    ),
                    (
                        "op-front",
                        "procedure front(q):
    if q.count == 0:
        error \"Queue Underflow\"
    return q.items[q.head]",
                    ),
                ],
            ),
            chained: implementation(
                Variant::Chained,
                "// Linked list implementation
struct Node {
    data: Item
    next: Node
}
struct Queue {
    head: Node
    tail: Node
}",
                &[
                    (
                        "op-enqueue",
                        "procedure enqueue(q, x):
    new_node = new Node()
    new_node.data = x
    if q.tail != null:
        q.tail.next = new_node
    q.tail = new_node
    if q.head == null:
        q.head = new_node",
                    ),
                    (
                        "op-dequeue",
                        "procedure dequeue(q):
    if q.head == null:
        error \"Queue Underflow\"
    q.head = q.head.next
    if q.head == null:
        q.tail = null",
                    ),
                    (
                        "op-front",
                        "procedure front(q):
    if q.head == null:
        error \"Queue Underflow\"
    return q.head.data",
                    ),
                ],
            ),
        },
    }
}
