// src/graph.rs
//! Неориентированный граф вершин с поиском компонент связности
//!
//! Вершины хранятся прямо в `petgraph::graph::UnGraph`, который сохраняет порядок вставки:
//! от него зависит порядок обнаружения компонент. Параллельные рёбра допускаются,
//! проверка дубликатов — забота вызывающего кода.

use crate::error::GraphError;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub type VertexId = u32;

/// Всё, что можно положить в граф, должно иметь уникальный идентификатор
pub trait Vertex {
    fn id(&self) -> VertexId;
}

/// Итог случайного связывания графа
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wiring {
    /// Сколько пар было решено выбрать
    pub sampled: usize,
    /// Сколько из них стали рёбрами
    pub random_edges: usize,
    /// Сколько рёбер добавлено для склейки компонент
    pub bridge_edges: usize,
}

#[derive(Debug, Clone)]
pub struct Graph<V> {
    inner: UnGraph<V, ()>,
    index: HashMap<VertexId, NodeIndex>,
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self {
            inner: UnGraph::default(),
            index: HashMap::new(),
        }
    }
}

impl<V: Vertex> Graph<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Регистрирует вершину с пустым списком смежности. Повторный id отклоняется.
    pub fn add_vertex(&mut self, vertex: V) -> Result<(), GraphError> {
        let id = vertex.id();
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateVertex(id));
        }
        let node = self.inner.add_node(vertex);
        self.index.insert(id, node);
        Ok(())
    }

    /// Добавляет ребро в оба списка смежности без проверки на дубликат
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<(), GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        let na = self.node(a)?;
        let nb = self.node(b)?;
        self.inner.add_edge(na, nb, ());
        Ok(())
    }

    /// Удаляет все вершины и рёбра
    pub fn clear(&mut self) {
        self.inner.clear();
        self.index.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.node_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    #[must_use]
    pub fn contains(&self, id: VertexId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&V> {
        self.index.get(&id).map(|&node| &self.inner[node])
    }

    /// Вершины в порядке регистрации
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.inner.node_indices().map(move |node| &self.inner[node])
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices().map(Vertex::id)
    }

    /// Соседи вершины в порядке добавления рёбер.
    ///
    /// Для неизвестной вершины возвращает пустой список.
    #[must_use]
    pub fn neighbors(&self, id: VertexId) -> Vec<VertexId> {
        let Some(&node) = self.index.get(&id) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self
            .inner
            .edges(node)
            .map(|edge| {
                let other = if edge.source() == node {
                    edge.target()
                } else {
                    edge.source()
                };
                (edge.id().index(), self.inner[other].id())
            })
            .collect();
        edges.sort_unstable_by_key(|&(edge, _)| edge);
        edges.into_iter().map(|(_, neighbor)| neighbor).collect()
    }

    #[must_use]
    pub fn has_edge(&self, a: VertexId, b: VertexId) -> bool {
        match (self.index.get(&a), self.index.get(&b)) {
            (Some(&na), Some(&nb)) => self.inner.contains_edge(na, nb),
            _ => false,
        }
    }

    /// Равномерно выбирает случайную вершину
    pub fn random_vertex<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&V, GraphError> {
        if self.is_empty() {
            return Err(GraphError::Empty);
        }
        let node = NodeIndex::new(rng.gen_range(0..self.len()));
        Ok(&self.inner[node])
    }

    /// Строит случайный граф и гарантирует его связность.
    ///
    /// Число попыток выбирается в `[0, |V| - 1]`; пара становится ребром, только
    /// если вершины различны и ещё не соседи. Затем компоненты склеиваются в цепочку.
    pub fn randomly_add_edges<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Wiring, GraphError> {
        if self.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut wiring = Wiring {
            sampled: rng.gen_range(0..self.len()),
            ..Wiring::default()
        };
        for _ in 0..wiring.sampled {
            let a = self.random_vertex(rng)?.id();
            let b = self.random_vertex(rng)?.id();
            if a != b && !self.has_edge(a, b) {
                self.add_edge(a, b)?;
                wiring.random_edges += 1;
            }
        }

        let components = self.get_connected_components();
        if components.len() > 1 {
            wiring.bridge_edges = self.connect_unconnected_vertices(&components, rng)?;
        }
        debug!(
            sampled = wiring.sampled,
            random_edges = wiring.random_edges,
            bridge_edges = wiring.bridge_edges,
            "граф связан"
        );
        Ok(wiring)
    }

    /// Соединяет соседние по порядку компоненты одним случайным ребром каждую пару.
    ///
    /// Возвращает число добавленных рёбер. После вызова граф связен,
    /// если `components` покрывали все вершины.
    pub fn connect_unconnected_vertices<R: Rng + ?Sized>(
        &mut self,
        components: &[Vec<VertexId>],
        rng: &mut R,
    ) -> Result<usize, GraphError> {
        let mut added = 0;
        for pair in components.windows(2) {
            let a = *pair[0].choose(rng).ok_or(GraphError::Empty)?;
            let b = *pair[1].choose(rng).ok_or(GraphError::Empty)?;
            self.add_edge(a, b)?;
            added += 1;
        }
        Ok(added)
    }

    /// Компоненты связности в порядке обнаружения (по порядку регистрации вершин)
    #[must_use]
    pub fn get_connected_components(&self) -> Vec<Vec<VertexId>> {
        let mut visited = HashSet::with_capacity(self.len());
        let mut components = Vec::new();
        for id in self.vertex_ids() {
            if !visited.contains(&id) {
                let mut component = Vec::new();
                self.dfs(id, &mut visited, &mut component);
                components.push(component);
            }
        }
        components
    }

    /// Поиск в глубину на явном стеке.
    ///
    /// Порядок посещения совпадает с рекурсивным вариантом: вершина помечается
    /// и добавляется в компоненту до обхода её соседей.
    pub fn dfs(&self, start: VertexId, visited: &mut HashSet<VertexId>, component: &mut Vec<VertexId>) {
        if !self.contains(start) || !visited.insert(start) {
            return;
        }
        component.push(start);

        let mut stack = vec![Frame::new(self.neighbors(start))];
        while let Some(frame) = stack.last_mut() {
            let next = frame.neighbors.get(frame.cursor).copied();
            frame.cursor += 1;
            match next {
                Some(neighbor) => {
                    if visited.insert(neighbor) {
                        component.push(neighbor);
                        stack.push(Frame::new(self.neighbors(neighbor)));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    fn node(&self, id: VertexId) -> Result<NodeIndex, GraphError> {
        self.index.get(&id).copied().ok_or(GraphError::UnknownVertex(id))
    }
}

struct Frame {
    neighbors: Vec<VertexId>,
    cursor: usize,
}

impl Frame {
    fn new(neighbors: Vec<VertexId>) -> Self {
        Self {
            neighbors,
            cursor: 0,
        }
    }
}
